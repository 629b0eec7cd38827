use std::fs::File;
use std::io::{self, Read, Write};

use clap::{ArgGroup, Parser};

use crate::runtime::{Limits, MAX_CALL_DEPTH, MAX_LOOP_DEPTH};

#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
#[clap(group(ArgGroup::new("input").args(&["file", "inline", "stdin"])))]
pub struct Config {
    /// Optionally output the loaded tokens to stdout, or to a file given as `-t=<path>`
    #[clap(short = 't', long = "tokens_output", require_equals = true)]
    pub tokens_output_path: Option<Option<String>>,

    /// Write program output to a file instead of stdout
    #[clap(short = 'o', long = "output")]
    pub output_path: Option<String>,

    /// Optionally read program as an arg
    #[clap(short, long, conflicts_with_all = &["file", "stdin"])]
    pub inline: Option<String>,

    /// Optionally read program from stdin
    #[clap(short, long, conflicts_with_all = &["file", "inline"])]
    pub stdin: bool,

    /// Don't execute the program only load it.
    #[clap(short = 'd', long)]
    pub dry_run: bool,

    /// How many loops may be open at once in a single call
    #[clap(long = "max_loop_depth", default_value_t = MAX_LOOP_DEPTH)]
    pub max_loop_depth: usize,

    /// How deeply calls may nest before the run is aborted
    #[clap(long = "max_call_depth", default_value_t = MAX_CALL_DEPTH)]
    pub max_call_depth: usize,

    /// Glass source file to be run
    pub file: Option<String>,
}

impl Config {
    pub fn get_source_name(&self) -> String {
        match (&self.file, &self.inline) {
            (Some(path), _) => path.clone(),
            (None, Some(_)) => "<inline>".to_string(),
            (None, None) => "<stdin>".to_string(),
        }
    }

    /// Reads the program text from whichever input was given. `None` means
    /// no input was provided at all.
    pub fn get_script(&mut self) -> io::Result<Option<String>> {
        if self.inline.is_some() {
            return Ok(self.inline.take());
        }

        if self.stdin {
            let mut input = String::new();

            io::stdin().read_to_string(&mut input)?;

            return Ok(Some(input));
        }

        match &self.file {
            Some(path) => std::fs::read_to_string(path).map(Some),
            None => Ok(None),
        }
    }

    pub fn get_output(&self) -> io::Result<Box<dyn Write>> {
        match self.output_path {
            Some(ref path) => Ok(Box::new(File::create(path)?)),
            None => Ok(Box::new(io::stdout())),
        }
    }

    pub fn limits(&self) -> Limits {
        Limits {
            max_loop_depth: self.max_loop_depth,
            max_call_depth: self.max_call_depth,
        }
    }
}

impl TryFrom<Vec<&str>> for Config {
    type Error = String;
    fn try_from(args: Vec<&str>) -> Result<Self, Self::Error> {
        match Config::try_parse_from(args) {
            Ok(config) => Ok(config),
            Err(e) => Err(e.to_string()),
        }
    }
}
