use crate::domain::model::{Book, BorrowReceipt, Durability, Recommendation};
use crate::utils::error::Result;
use std::io::Write;

pub fn render_borrow<W: Write>(out: &mut W, receipt: &BorrowReceipt, json: bool) -> Result<()> {
    if json {
        return write_json(out, receipt);
    }

    writeln!(out, "Book \"{}\" borrowed successfully", receipt.book.title)?;
    if let Durability::Unsynced { reason } = &receipt.durability {
        writeln!(out, "Warning: borrow recorded but not saved ({})", reason)?;
    }
    Ok(())
}

pub fn render_recommendations<W: Write>(
    out: &mut W,
    recommendations: &[Recommendation],
    json: bool,
) -> Result<()> {
    if json {
        return write_json(out, recommendations);
    }

    writeln!(out, "Recommended Books:")?;
    if recommendations.is_empty() {
        writeln!(out, "No recommendations available")?;
    }
    for rec in recommendations {
        writeln!(out, "- {}", rec.book.title)?;
    }
    Ok(())
}

pub fn render_popular<W: Write>(out: &mut W, books: &[Book], k: usize, json: bool) -> Result<()> {
    if json {
        return write_json(out, books);
    }

    writeln!(out, "Top {} Popular Books:", k)?;
    for (rank, book) in books.iter().enumerate() {
        writeln!(out, "{}. {} ({} times)", rank + 1, book.title, book.times_borrowed)?;
    }
    Ok(())
}

fn write_json<W: Write, T: serde::Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(std::io::Error::from)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_popular_listing() {
        let books = vec![
            Book::new(101, "C_Programming").with_times_borrowed(3),
            Book::new(102, "SICP").with_times_borrowed(1),
        ];
        let text = render(|out| render_popular(out, &books, 3, false));
        assert_eq!(
            text,
            "Top 3 Popular Books:\n1. C_Programming (3 times)\n2. SICP (1 times)\n"
        );
    }

    #[test]
    fn test_empty_recommendations() {
        let text = render(|out| render_recommendations(out, &[], false));
        assert_eq!(text, "Recommended Books:\nNo recommendations available\n");
    }

    #[test]
    fn test_unsynced_borrow_warns() {
        let receipt = BorrowReceipt {
            user_id: 7,
            book: Book::new(101, "C_Programming").with_times_borrowed(1),
            durability: Durability::Unsynced {
                reason: "IO error: disk full".to_string(),
            },
        };
        let text = render(|out| render_borrow(out, &receipt, false));
        assert!(text.starts_with("Book \"C_Programming\" borrowed successfully\n"));
        assert!(text.contains("not saved (IO error: disk full)"));
    }

    #[test]
    fn test_json_recommendations() {
        let recs = vec![Recommendation {
            book: Book::new(103, "Dune"),
            score: 2,
        }];
        let text = render(|out| render_recommendations(out, &recs, true));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["book"]["id"], 103);
        assert_eq!(value[0]["score"], 2);
    }

    #[test]
    fn test_json_receipt_reports_durability() {
        let receipt = BorrowReceipt {
            user_id: 7,
            book: Book::new(101, "C_Programming").with_times_borrowed(1),
            durability: Durability::Persisted,
        };
        let text = render(|out| render_borrow(out, &receipt, true));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["durability"]["status"], "persisted");
        assert_eq!(value["book"]["times_borrowed"], 1);
    }
}
