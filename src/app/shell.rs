use crate::app::report::{render_borrow, render_popular, render_recommendations};
use crate::core::service::LibraryService;
use crate::core::SnapshotStore;
use crate::utils::error::{LibraryError, Result};
use std::io::{BufRead, Write};

const MENU: &str = "\n1. Borrow Book\n2. Recommend Books\n3. View Popular Books\n4. Exit\nEnter choice: ";

/// Interactive menu over a `LibraryService`. Reading stops on `4` or at end
/// of input; the model is flushed on the way out if a save failed earlier.
pub struct Shell<'a, S: SnapshotStore, R: BufRead, W: Write> {
    service: &'a mut LibraryService<S>,
    input: R,
    out: W,
    top_k: usize,
}

impl<'a, S: SnapshotStore, R: BufRead, W: Write> Shell<'a, S, R, W> {
    pub fn new(service: &'a mut LibraryService<S>, input: R, out: W, top_k: usize) -> Self {
        Self {
            service,
            input,
            out,
            top_k,
        }
    }

    /// Runs the menu until `4` or end of input.
    pub fn run(mut self) -> Result<()> {
        tracing::debug!("Shell started");

        while let Some(choice) = self.prompt(MENU)? {
            match choice {
                1 => {
                    let Some(user_id) = self.prompt("Enter User ID: ")? else {
                        break;
                    };
                    let Some(book_id) = self.prompt("Enter Book ID: ")? else {
                        break;
                    };
                    match self.service.borrow(user_id, book_id) {
                        Ok(receipt) => render_borrow(&mut self.out, &receipt, false)?,
                        Err(e) => self.report(&e)?,
                    }
                }
                2 => {
                    let Some(user_id) = self.prompt("Enter User ID: ")? else {
                        break;
                    };
                    match self.service.recommend(user_id) {
                        Ok(recs) => render_recommendations(&mut self.out, &recs, false)?,
                        Err(e) => self.report(&e)?,
                    }
                }
                3 => {
                    let books = self.service.top_popular(self.top_k);
                    render_popular(&mut self.out, &books, self.top_k, false)?;
                }
                4 => break,
                _ => writeln!(self.out, "Invalid choice")?,
            }
        }

        if !self.service.is_synced() {
            if let Err(e) = self.service.flush() {
                self.report(&e)?;
            }
        }
        tracing::debug!("Shell finished");
        Ok(())
    }

    /// Shows `label` until a whole number is entered. `None` means end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<i64>> {
        loop {
            write!(self.out, "{}", label)?;
            self.out.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            match line.trim().parse::<i64>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.out, "Please enter a number")?,
            }
        }
    }

    fn report(&mut self, error: &LibraryError) -> Result<()> {
        tracing::debug!("Request rejected: {}", error);
        writeln!(self.out, "{}", error.user_friendly_message())?;
        Ok(())
    }
}
