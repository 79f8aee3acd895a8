//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tutorweave - Decorates course trees for static learning sites
#[derive(Parser, Debug)]
#[command(name = "tw")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if tw was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a decoration pass and write the decorated course as JSON
    #[command(
        name = "decorate",
        long_about = "Run a decoration pass and write the decorated course as JSON.\n\n\
            Reads a course tree (tutors.json layout), computes parent links, \
            breadcrumbs, icons, rendered markdown, panel and unit groupings, walls \
            and the route index, then writes the result. Node references in the \
            output are routes.\n\n\
            The pass fingerprint is printed afterwards. Two runs over the same \
            input always print the same fingerprint.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Decorate and print to stdout
    tw decorate tutors.json

    # Write to a file, injecting the course id into routes
    tw decorate tutors.json --course-id web-dev -o course.json

    # Fail instead of overwriting when two objects share a route
    tw decorate tutors.json --reject-collisions

CONFIGURATION:
    Course id, course URL, walls and the collision policy can also be set in
    <course dir>/.tutorweave/config.toml. Flags take precedence."
    )]
    Decorate {
        /// Course tree in tutors.json layout
        input: PathBuf,

        /// Course id injected into routes and videos
        #[arg(long)]
        course_id: Option<String>,

        /// Course URL injected into images and PDFs
        #[arg(long)]
        course_url: Option<String>,

        /// Fail on duplicate routes instead of keeping the last one
        #[arg(long)]
        reject_collisions: bool,

        /// Write JSON here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Display the course tree as an indented outline
    #[command(
        name = "tree",
        long_about = "Display the course tree as an indented outline.\n\n\
            Each line shows a learning object's type, title and route, indented \
            by depth. Hidden objects are marked.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Outline a course
    tw tree tutors.json

READING THE OUTPUT:
    course      Web Development  /course/web-dev
      topic     Week 1           /topic/web-dev/topic-01
        talk    Intro            /talk/web-dev/topic-01/talk-1"
    )]
    Tree {
        /// Course tree in tutors.json layout
        input: PathBuf,
    },

    /// List the walls of a course
    #[command(
        name = "walls",
        long_about = "List the walls of a course.\n\n\
            A wall gathers every learning object of one type from anywhere in \
            the course, in document order. Only non-empty walls are shown.",
        after_help = "\
WORKFLOW EXAMPLES:
    # All walls
    tw walls tutors.json

    # Only the lab wall
    tw walls tutors.json --type lab"
    )]
    Walls {
        /// Course tree in tutors.json layout
        input: PathBuf,

        /// Only show the wall for this type
        #[arg(long = "type", value_name = "TYPE")]
        lo_type: Option<String>,
    },

    /// Show a learning object by route
    #[command(
        name = "lookup",
        long_about = "Show a learning object by route.\n\n\
            Looks the route up in the decorated course's index and prints the \
            object's type, title, parent and breadcrumb chain. Routes are matched \
            after course id injection.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Find a lab
    tw lookup tutors.json /lab/web-dev/topic-01/lab-01"
    )]
    Lookup {
        /// Course tree in tutors.json layout
        input: PathBuf,

        /// Route to look up
        route: String,
    },

    /// Get or list configuration values
    #[command(
        name = "config",
        long_about = "Get or list effective configuration values.\n\n\
            Values are resolved from defaults, the global config file and the \
            course config file in the working directory, later sources winning.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Everything, with where it was loaded from
    tw config list

    # One value
    tw config get route_collisions"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for tw commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    tw completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    tw completion zsh >> ~/.zshrc

    # Fish
    tw completion fish > ~/.config/fish/completions/tw.fish

    # PowerShell
    tw completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// List all configuration values
    List,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_decorate_flags() {
        let cli = Cli::try_parse_from([
            "tw",
            "-q",
            "decorate",
            "tutors.json",
            "--course-id",
            "oop",
            "--reject-collisions",
            "-o",
            "out.json",
        ])
        .unwrap();

        assert!(cli.quiet);
        match cli.command {
            Command::Decorate {
                input,
                course_id,
                reject_collisions,
                output,
                ..
            } => {
                assert_eq!(input, PathBuf::from("tutors.json"));
                assert_eq!(course_id.as_deref(), Some("oop"));
                assert!(reject_collisions);
                assert_eq!(output, Some(PathBuf::from("out.json")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_walls_type() {
        let cli = Cli::try_parse_from(["tw", "walls", "tutors.json", "--type", "lab"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Walls { lo_type: Some(ref t), .. } if t == "lab"
        ));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tw", "tree", "tutors.json", "--debug", "--cwd", "/tmp"])
            .unwrap();
        assert!(cli.debug);
        assert_eq!(cli.cwd, Some(PathBuf::from("/tmp")));
    }
}
