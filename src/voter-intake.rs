//! A simple CLI tool for checking a voter list before uploading it.
//! This uses the server's own intake rules, so anything it accepts is
//! accepted by `POST /admin/voters/csv`.

use std::fs;

use clap::{Arg, ArgAction, ArgMatches, Command};

use coblosin_backend::model::intake::IntakeReport;

const PROGRAM_NAME: &str = "voter-intake";

const ABOUT_TEXT: &str = "Validate a CSV list of voter wallet addresses.

EXIT CODES:
     0: At least one valid address was found.
   255: Ran successfully, but no valid addresses were found.
 Other: Error.";

const CSV_PATH: &str = "CSV_PATH";

const CSV_PATH_HELP: &str = "The path to a voter list, one address per line\n\
or separated by commas";

const LIST: &str = "list";

/// Construct the CLI configuration.
fn cli() -> Command {
    // Make the build dirty when the toml changes.
    include_str!("../Cargo.toml");

    clap::command!(PROGRAM_NAME)
        .about(ABOUT_TEXT)
        .arg(
            Arg::new(CSV_PATH)
                .help(CSV_PATH_HELP)
                .action(ArgAction::Set)
                .required(true),
        )
        .arg(
            Arg::new(LIST)
                .long(LIST)
                .short('l')
                .help("Print every valid address")
                .action(ArgAction::SetTrue),
        )
}

/// Errors that this program may produce.
#[derive(Debug, Eq, PartialEq)]
enum Error {
    /// IO error described by the inner message.
    IO(String),
    /// The file held no valid addresses; the count of rejected records is attached.
    NoValidAddresses(usize),
}

/// Read and validate a voter list.
fn intake(path: &str) -> Result<IntakeReport, Error> {
    let text = fs::read_to_string(path).map_err(|e| Error::IO(e.to_string()))?;
    let report = IntakeReport::from_csv(&text);
    if report.is_empty() {
        return Err(Error::NoValidAddresses(report.invalid_count));
    }
    Ok(report)
}

/// Run intake, report the result, and return the exit code.
fn run(args: &ArgMatches) -> u8 {
    // Required argument is guaranteed to be present.
    let path: &String = args.get_one(CSV_PATH).unwrap();
    match intake(path) {
        Ok(report) => {
            println!(
                "{} valid address{}, {} invalid record{}.",
                report.valid_count(),
                if report.valid_count() != 1 { "es" } else { "" },
                report.invalid_count,
                if report.invalid_count != 1 { "s" } else { "" }
            );
            if args.get_flag(LIST) {
                for address in &report.valid_addresses {
                    println!("{address}");
                }
            }
            0
        }
        Err(Error::IO(msg)) => {
            println!("IO error: {msg}");
            1
        }
        Err(Error::NoValidAddresses(invalid)) => {
            println!("No valid wallet addresses found ({invalid} invalid).");
            255
        }
    }
}

fn main() {
    let args = cli().get_matches();
    let exit_code = run(&args);
    std::process::exit(exit_code.into())
}

#[cfg(test)]
mod tests {
    use coblosin_backend::model::voter::WalletAddress;

    use super::*;

    #[test]
    fn intake_sample_files() {
        let report = intake("sample_data/voters.csv").unwrap();
        assert_eq!(
            report.valid_addresses,
            vec![
                WalletAddress::from("0x742d35Cc6634C0532925a3b844Bc454e4438f44e"),
                WalletAddress::from("0x8626f6940E2eb28930eFb4CeF49B2d1F2C9C1199"),
                WalletAddress::from("0x1234567890abcdef"),
            ]
        );
        assert_eq!(report.invalid_count, 2);

        assert_eq!(
            intake("sample_data/voters_invalid.csv"),
            Err(Error::NoValidAddresses(2))
        );
        assert!(matches!(intake("not a real file"), Err(Error::IO(_))));
    }

    #[test]
    fn correct_cli_usage() {
        let command_line = [PROGRAM_NAME, "sample_data/voters.csv"];
        let args = cli().try_get_matches_from(command_line).unwrap();
        assert_eq!(run(&args), 0);

        let command_line = [PROGRAM_NAME, "--list", "sample_data/voters.csv"];
        let args = cli().try_get_matches_from(command_line).unwrap();
        assert_eq!(run(&args), 0);

        let command_line = [PROGRAM_NAME, "sample_data/voters_invalid.csv"];
        let args = cli().try_get_matches_from(command_line).unwrap();
        assert_eq!(run(&args), 255);

        let command_line = [PROGRAM_NAME, "not a real file"];
        let args = cli().try_get_matches_from(command_line).unwrap();
        assert_eq!(run(&args), 1);
    }

    #[test]
    fn bad_cli_usage() {
        // Something very wrong.
        let command_line = [PROGRAM_NAME, "this", "invocation", "is", "incorrect"];
        cli().try_get_matches_from(command_line).unwrap_err();

        // No options at all.
        let command_line = [PROGRAM_NAME];
        cli().try_get_matches_from(command_line).unwrap_err();
    }
}
