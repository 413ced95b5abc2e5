use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use acf_rename::scaffold::{self, ScaffoldOptions, ScaffoldReport};
use acf_rename::{FieldInputs, InputField, InputSource};

use crate::commands::CmdResult;
use crate::tty;

#[derive(Args, Debug, Default)]
pub struct RenameArgs {
    /// Field label, e.g. "Amazing Field" (prompted for when omitted)
    #[arg(long)]
    pub field_label: Option<String>,
    /// Function prefix, e.g. "acme" (prompted for when omitted)
    #[arg(long)]
    pub prefix: Option<String>,
    /// Text domain, e.g. "acme-plugin" (prompted for when omitted)
    #[arg(long)]
    pub text_domain: Option<String>,
    /// Directory containing the acf-imagecropper folder
    #[arg(long, default_value = ".")]
    pub path: String,
    /// Show what would change without touching the tree
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "command")]
pub enum RenameOutput {
    #[serde(rename = "rename")]
    Rename {
        inputs: FieldInputs,
        dry_run: bool,
        report: ScaffoldReport,
    },
}

/// Inputs from flags, with missing values asked for interactively.
///
/// `ask` returns `None` when the user ends input, which leaves the value
/// empty so the run fails with a missing-argument error.
pub struct PromptInputs<F> {
    provided: [Option<String>; 3],
    interactive: bool,
    ask: F,
}

impl<F> PromptInputs<F>
where
    F: FnMut(&str) -> acf_rename::Result<Option<String>>,
{
    pub fn new(args: &RenameArgs, interactive: bool, ask: F) -> Self {
        Self {
            provided: [
                args.field_label.clone(),
                args.prefix.clone(),
                args.text_domain.clone(),
            ],
            interactive,
            ask,
        }
    }

    fn value_for(&mut self, index: usize, field: InputField) -> acf_rename::Result<String> {
        if let Some(value) = self.provided[index].take() {
            return Ok(value);
        }
        if !self.interactive {
            return Ok(String::new());
        }

        loop {
            let message = format!("{} ({}) ", field.prompt(), field.initial());
            let Some(answer) = (self.ask)(&message)? else {
                return Ok(String::new());
            };

            let value = if answer.is_empty() {
                field.initial().to_string()
            } else {
                answer
            };

            match field.validate(&value) {
                Ok(()) => return Ok(value),
                Err(_) => tty::status(field.problem()),
            }
        }
    }
}

impl<F> InputSource for PromptInputs<F>
where
    F: FnMut(&str) -> acf_rename::Result<Option<String>>,
{
    fn collect(&mut self) -> acf_rename::Result<FieldInputs> {
        Ok(FieldInputs {
            field_label: self.value_for(0, InputField::FieldLabel)?,
            prefix: self.value_for(1, InputField::Prefix)?,
            text_domain: self.value_for(2, InputField::TextDomain)?,
        })
    }
}

pub fn run(args: RenameArgs) -> CmdResult<RenameOutput> {
    let mut source = PromptInputs::new(&args, tty::can_prompt(), tty::prompt);
    run_with_source(&args, &mut source)
}

fn run_with_source(
    args: &RenameArgs,
    source: &mut impl InputSource,
) -> CmdResult<RenameOutput> {
    let inputs = source.collect()?;
    inputs.validate()?;

    let workspace = PathBuf::from(shellexpand::tilde(&args.path).to_string());
    let options = ScaffoldOptions {
        dry_run: args.dry_run,
    };
    let report = scaffold::run(&inputs, &workspace, &options)?;

    Ok((
        RenameOutput::Rename {
            inputs,
            dry_run: args.dry_run,
            report,
        },
        0,
    ))
}
