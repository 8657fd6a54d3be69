//! The console menu loop.

use std::io::{BufRead, Write};

use crate::error::AppError;
use crate::menu::MenuOp;
use crate::session::Session;

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>, AppError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

fn write_menu<W: Write>(output: &mut W) -> Result<(), AppError> {
    for op in MenuOp::ALL {
        writeln!(output, "{op}")?;
    }
    write!(output, "Your choice: ")?;
    output.flush()?;
    Ok(())
}

/// Run one menu choice and print its outcome.
///
/// Operation failures are printed and logged. Only console I/O errors escape.
fn handle_choice<W: Write>(
    session: &Session,
    choice: &str,
    output: &mut W,
) -> Result<(), AppError> {
    let outcome = match choice.parse::<u32>() {
        Ok(number) => MenuOp::from_number(number)
            .ok_or(AppError::UnknownOperation(number))
            .and_then(|op| session.run(op)),
        Err(_) => {
            writeln!(output, "Invalid choice '{choice}', enter a number from 1 to 22")?;
            return Ok(());
        }
    };

    match outcome {
        Ok(report) => writeln!(output, "{report}")?,
        Err(err) => {
            log::warn!("operation {choice} failed: {err}");
            writeln!(output, "Error: {err}")?;
        }
    }
    Ok(())
}

/// Show the menu and run operations until the operator stops or input ends.
pub fn run_interactive<R: BufRead, W: Write>(
    session: &Session,
    mut input: R,
    mut output: W,
) -> Result<(), AppError> {
    loop {
        write_menu(&mut output)?;
        let Some(choice) = read_line(&mut input)? else {
            break;
        };
        writeln!(output)?;
        handle_choice(session, &choice, &mut output)?;

        write!(output, "Continue? (y/n) ")?;
        output.flush()?;
        match read_line(&mut input)? {
            Some(answer) if answer.eq_ignore_ascii_case("y") => writeln!(output)?,
            _ => break,
        }
    }
    writeln!(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;

    use polywire_codec::TypeRegistry;
    use polywire_vfs::MemoryStore;

    fn drive(store: &MemoryStore, script: &str) -> String {
        let session = Session::new(Arc::new(store.clone()), Arc::new(TypeRegistry::standard()));
        let mut output = Vec::new();
        run_interactive(&session, Cursor::new(script.as_bytes()), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn save_then_load_people() {
        let store = MemoryStore::new();
        let out = drive(&store, "1\ny\n2\nn\n");
        assert!(out.contains("1. Save person array (envelope)"));
        assert!(out.contains("22. Load storage devices (envelope)"));
        assert!(out.contains("Serialization completed"));
        assert!(out.contains("Larry Page\t42\tGoogle"));
        assert!(out.contains("Tim Cook\t55\tApple"));
        assert_eq!(out.matches("Continue? (y/n)").count(), 2);
        assert!(store.get("soap.xml").is_some());
    }

    #[test]
    fn errors_do_not_end_the_loop() {
        let store = MemoryStore::new();
        let out = drive(&store, "18\ny\nabc\ny\n99\ny\n17\ny\n18\nn\n");
        assert!(out.contains("Error: storage error: not found: device.json"));
        assert!(out.contains("Invalid choice 'abc'"));
        assert!(out.contains("Error: unknown operation 99"));
        assert!(out.contains("Type: Flash Capacity: 0 Speed: 0"));
        assert_eq!(out.matches("Continue? (y/n)").count(), 5);
    }

    #[test]
    fn anything_but_y_stops() {
        let store = MemoryStore::new();
        let out = drive(&store, "13\nno\n14\n");
        assert!(out.contains("Serialization completed"));
        assert!(!out.contains("1,2,3"));
    }

    #[test]
    fn end_of_input_stops() {
        let store = MemoryStore::new();
        let out = drive(&store, "");
        assert!(out.contains("Your choice: "));
        assert!(!out.contains("Continue?"));

        let out = drive(&store, "7\n");
        assert!(out.contains("Serialization completed"));
        assert_eq!(out.matches("Your choice: ").count(), 1);
    }
}
