use crate::api::client::{Navigator, Notifier, Route};

/// Terminal notifier: the CLI's stand-in for a toast surface.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        // Space before the emoji prevents terminal clipping
        println!(" ✅ {}", message);
    }

    fn error(&self, message: &str) {
        println!(" ❌ {}", message);
    }

    fn info(&self, message: &str) {
        println!(" ℹ️ {}", message);
    }
}

/// Terminal navigator: routes become follow-up command hints.
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn goto(&self, route: Route) {
        match route {
            Route::Login => println!(" ➜ Run 'gym-cli auth login' to sign in"),
            Route::Dashboard => println!(" ➜ Run 'gym-cli dashboard' for an overview"),
        }
    }
}
