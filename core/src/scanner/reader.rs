use std::io::{BufRead, Result as IoResult};
use std::path::Path;

use encoding_rs::UTF_8;

use super::handler::JournalHandler;
use crate::journal::parse_line;

/// Feed every line of a journal into `handler`.
///
/// Lines that fail to parse are logged and skipped; a half-written last line
/// from a running game client is normal. Only I/O errors are returned.
/// Returns the number of lines read.
pub fn read_journal<R: BufRead, H: JournalHandler>(
    mut reader: R,
    source: &Path,
    handler: &mut H,
) -> IoResult<u64> {
    let mut line_buf = Vec::new();
    let mut line_number = 0u64;

    loop {
        line_buf.clear();
        let bytes_read = reader.read_until(b'\n', &mut line_buf)?;
        if bytes_read == 0 {
            break; // EOF
        }
        line_number += 1;

        // Journals are UTF-8, sometimes with a BOM on the first line
        let (line, _, had_errors) = UTF_8.decode(&line_buf);
        if had_errors {
            tracing::warn!(
                path = %source.display(),
                line = line_number,
                "Invalid UTF-8 in journal line"
            );
        }

        match parse_line(&line) {
            Ok(event) => handler.handle_event(event),
            Err(e) => {
                tracing::warn!(
                    path = %source.display(),
                    line = line_number,
                    error = %e,
                    "Skipping malformed journal line"
                );
            }
        }
    }

    handler.end_of_file();
    Ok(line_number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::handler::OpenMissions;
    use std::io::Cursor;

    #[test]
    fn test_bom_and_missing_trailing_newline() {
        let input = "\u{feff}{\"event\":\"MissionAccepted\",\"MissionID\":3,\"KillCount\":9}\n{\"event\":\"MissionRedirected\",\"MissionID\":3}";
        let mut open = OpenMissions::new();

        let lines = read_journal(Cursor::new(input), Path::new("test.log"), &mut open).unwrap();
        assert_eq!(lines, 2);
        assert_eq!(open.missions()[&3].count, 9);
        assert!(open.missions()[&3].is_completed);
    }

    #[test]
    fn test_malformed_line_does_not_stop_reading() {
        let input = concat!(
            "{\"event\":\"MissionAccepted\",\"MissionID\":1}\n",
            "{\"event\":\"MissionAcc\n",
            "garbage\n",
            "{\"event\":\"MissionAccepted\",\"MissionID\":2}\n",
        );
        let mut open = OpenMissions::new();

        let lines = read_journal(Cursor::new(input), Path::new("test.log"), &mut open).unwrap();
        assert_eq!(lines, 4);
        assert_eq!(open.missions().len(), 2);
    }

    #[test]
    fn test_negative_kill_count_line_is_skipped() {
        let input = concat!(
            "{\"event\":\"MissionAccepted\",\"Faction\":\"A\",\"MissionID\":1,\"KillCount\":5}\n",
            "{\"event\":\"MissionAccepted\",\"Faction\":\"A\",\"MissionID\":2,\"KillCount\":-10}\n",
            "{\"event\":\"MissionRedirected\",\"MissionID\":1}\n",
        );
        let mut open = OpenMissions::new();

        let lines = read_journal(Cursor::new(input), Path::new("test.log"), &mut open).unwrap();
        assert_eq!(lines, 3);
        assert_eq!(open.missions().len(), 1);
        assert!(open.missions()[&1].is_completed);
        assert!(!open.missions().contains_key(&2));
    }
}
