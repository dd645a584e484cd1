//! Command-line surface of the roster binary.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "roster_cli",
    version,
    about = "Teacher/student roster over a local SQLite store"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// One roster call. JSON bodies are read from stdin when omitted.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Register students with a teacher: {"teacher": .., "students": [..]}
    Register { body: Option<String> },
    /// Students shared by every teacher: {"teachers": [..]}
    #[command(name = "commonstudents")]
    CommonStudents { body: Option<String> },
    /// Suspend a student: {"student": ..}
    Suspend { body: Option<String> },
    /// Recipients of a notification: {"teacher": .., "notification": ..}
    #[command(name = "retrievefornotifications")]
    RetrieveForNotifications { body: Option<String> },
    /// Seed a teacher record.
    AddTeacher { email: String },
    /// Seed a student record.
    AddStudent { email: String },
}

impl Commands {
    /// Name used in log events; matches the subcommand name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Register { .. } => "register",
            Self::CommonStudents { .. } => "commonstudents",
            Self::Suspend { .. } => "suspend",
            Self::RetrieveForNotifications { .. } => "retrievefornotifications",
            Self::AddTeacher { .. } => "add-teacher",
            Self::AddStudent { .. } => "add-student",
        }
    }

    /// Fills an omitted JSON body from `read`. Seeding commands and
    /// commands given an explicit body never call `read`.
    pub fn read_missing_body<F>(&mut self, read: F) -> Result<(), String>
    where
        F: FnOnce() -> Result<String, String>,
    {
        if let Some(slot) = self.body_slot() {
            if slot.is_none() {
                *slot = Some(read()?);
            }
        }
        Ok(())
    }

    fn body_slot(&mut self) -> Option<&mut Option<String>> {
        match self {
            Self::Register { body }
            | Self::CommonStudents { body }
            | Self::Suspend { body }
            | Self::RetrieveForNotifications { body } => Some(body),
            Self::AddTeacher { .. } | Self::AddStudent { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::error::ErrorKind;
    use clap::{CommandFactory, Parser};

    fn parse(args: &[&str]) -> Result<Commands, ErrorKind> {
        Cli::try_parse_from(std::iter::once("roster_cli").chain(args.iter().copied()))
            .map(|cli| cli.command)
            .map_err(|err| err.kind())
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn subcommands_use_route_names() {
        assert_eq!(
            parse(&["register", r#"{"teacher":"tom@gmail.com","students":[]}"#]),
            Ok(Commands::Register {
                body: Some(r#"{"teacher":"tom@gmail.com","students":[]}"#.to_string())
            })
        );
        assert_eq!(
            parse(&["commonstudents"]),
            Ok(Commands::CommonStudents { body: None })
        );
        assert_eq!(
            parse(&["retrievefornotifications"]),
            Ok(Commands::RetrieveForNotifications { body: None })
        );
        assert_eq!(
            parse(&["add-student", "jerry@gmail.com"]),
            Ok(Commands::AddStudent {
                email: "jerry@gmail.com".to_string()
            })
        );

        for command in [
            Commands::Suspend { body: None },
            Commands::AddTeacher {
                email: String::new(),
            },
        ] {
            let name = command.name();
            assert!(Cli::command().find_subcommand(name).is_some(), "{name}");
        }
    }

    #[test]
    fn help_and_version_are_generated() {
        assert_eq!(parse(&["--help"]), Err(ErrorKind::DisplayHelp));
        assert_eq!(parse(&["--version"]), Err(ErrorKind::DisplayVersion));
    }

    #[test]
    fn usage_errors_are_rejected() {
        assert_eq!(parse(&["notify"]), Err(ErrorKind::InvalidSubcommand));
        assert_eq!(
            parse(&["add-teacher"]),
            Err(ErrorKind::MissingRequiredArgument)
        );
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn only_omitted_json_bodies_are_read() {
        let mut missing = Commands::Suspend { body: None };
        missing
            .read_missing_body(|| Ok(r#"{"student":"jerry@gmail.com"}"#.to_string()))
            .unwrap();
        assert_eq!(
            missing,
            Commands::Suspend {
                body: Some(r#"{"student":"jerry@gmail.com"}"#.to_string())
            }
        );

        let mut given = Commands::Suspend {
            body: Some("{}".to_string()),
        };
        given
            .read_missing_body(|| panic!("body was given"))
            .unwrap();

        let mut seeding = Commands::AddTeacher {
            email: "tom@gmail.com".to_string(),
        };
        seeding
            .read_missing_body(|| panic!("seeding takes no body"))
            .unwrap();
    }

    #[test]
    fn read_failures_propagate() {
        let mut command = Commands::Register { body: None };
        let err = command
            .read_missing_body(|| Err("stdin closed".to_string()))
            .unwrap_err();
        assert_eq!(err, "stdin closed");
    }
}
