// Adapters layer: concrete notifier implementations.

pub mod console;
pub mod telegram;

pub use console::ConsoleNotifier;
pub use telegram::TelegramNotifier;
