use std::fs::File;
use std::io::Write;

use super::config::Config;
use super::error::InterpreterError;
use crate::loader::load_program;
use crate::runtime::{Environment, VM};

pub struct Driver {
    config: Config,
}

impl Driver {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn run(&mut self) -> Result<(), InterpreterError> {
        let source = self.config.get_script()?.ok_or(InterpreterError::NoInput)?;
        let env = load_program(&source)?;

        tracing::debug!(source = %self.config.get_source_name(), "load finished");

        if let Some(ref path) = self.config.tokens_output_path {
            self.output_tokens(&env, path.as_deref())?;
        }

        if self.config.dry_run {
            return Ok(());
        }

        let out = self.config.get_output()?;
        let mut vm = VM::new(&env, out, self.config.limits());

        vm.run_main()?;

        Ok(())
    }

    fn output_tokens(&self, env: &Environment, path: Option<&str>) -> Result<(), InterpreterError> {
        let dump = env.render_tokens();

        match path {
            Some(path) => File::create(path)?.write_all(dump.as_bytes())?,
            None => std::io::stdout().write_all(dump.as_bytes())?,
        }

        Ok(())
    }
}
