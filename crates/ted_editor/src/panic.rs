use std::cell::RefCell;
use std::panic::{self, UnwindSafe};

use backtrace::Backtrace;
use color_backtrace::termcolor::{ColorChoice, StandardStream};
use color_backtrace::BacktracePrinter;

thread_local! {
    static LAST_PANIC: RefCell<Option<Report>> = RefCell::default();
}

/// A panic captured while the terminal was in raw mode.
struct Report {
    message: String,
    trace: Backtrace,
}

impl Report {
    fn capture(message: String) -> Self {
        Self {
            message,
            trace: Backtrace::new(),
        }
    }

    fn print(self) {
        let mut stderr = StandardStream::stderr(ColorChoice::Auto);

        if let Err(err) = BacktracePrinter::new()
            .message(self.message.clone())
            .print_trace(&self.trace, &mut stderr)
        {
            eprintln!("{}", self.message);
            log::error!("couldn't print backtrace: {err}");
        }
    }
}

/// Run `f`, holding any panic report back until `f` has unwound.
///
/// The closure owns the terminal, so by the time the report is printed the
/// screen has been restored. Returns `None` if `f` panicked.
#[must_use]
pub fn catch_and_reprint_panic<T>(f: impl FnOnce() -> T + UnwindSafe) -> Option<T> {
    let prev_hook = panic::take_hook();

    panic::set_hook(Box::new(|info| {
        let message = info.to_string();
        log::error!("{message}");
        LAST_PANIC.with(|last| *last.borrow_mut() = Some(Report::capture(message)));
    }));

    let result = panic::catch_unwind(f);

    panic::set_hook(prev_hook);

    match result {
        Ok(value) => Some(value),

        Err(_) => {
            match LAST_PANIC.with(|last| last.borrow_mut().take()) {
                Some(report) => report.print(),
                None => eprintln!("panicked"),
            }

            None
        }
    }
}
