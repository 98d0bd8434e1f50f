use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::error::PruneError;

/// Asks for an integer on `out` and reads it from `input`.
pub fn ask_integer<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &'static str,
) -> Result<i64> {
    write!(out, "{label}: ").context("failed writing prompt")?;
    out.flush().context("failed writing prompt")?;

    let mut line = String::new();
    if input.read_line(&mut line).context("failed reading stdin")? == 0 {
        return Err(PruneError::MissingBorderValue(label).into());
    }
    let raw = line.trim();
    raw.parse::<i64>().map_err(|_| {
        PruneError::BadInteger {
            field: label,
            input: raw.to_string(),
        }
        .into()
    })
}

/// `y`/`yes` in any case confirms; anything else, including EOF, declines.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<bool> {
    write!(out, "\n{question} (y/N) ").context("failed writing prompt")?;
    out.flush().context("failed writing prompt")?;

    let mut line = String::new();
    input.read_line(&mut line).context("failed reading stdin")?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(matches!(answer.as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_negative_integers() {
        let mut input = Cursor::new("  -512 \n");
        let mut out = Vec::new();
        let v = ask_integer(&mut input, &mut out, "World border center Z").expect("int");
        assert_eq!(v, -512);
        assert_eq!(String::from_utf8(out).expect("utf8"), "World border center Z: ");
    }

    #[test]
    fn rejects_garbage_and_eof() {
        let mut out = Vec::new();
        let err = ask_integer(&mut Cursor::new("abc\n"), &mut out, "World border diameter")
            .expect_err("garbage");
        assert!(matches!(
            err.downcast_ref::<PruneError>(),
            Some(PruneError::BadInteger { .. })
        ));

        let err = ask_integer(&mut Cursor::new(""), &mut out, "World border diameter")
            .expect_err("eof");
        assert!(matches!(
            err.downcast_ref::<PruneError>(),
            Some(PruneError::MissingBorderValue(_))
        ));
    }

    #[test]
    fn confirmation_answers() {
        for (answer, expected) in [("y\n", true), ("YES\n", true), ("n\n", false), ("", false), ("o\n", false)] {
            let mut out = Vec::new();
            let got = confirm(&mut Cursor::new(answer), &mut out, "Confirm deletion?").expect("confirm");
            assert_eq!(got, expected, "{answer:?}");
        }
    }
}
