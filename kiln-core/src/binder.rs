//! Mapping model properties onto command-line arguments.
//!
//! Binding is two-phase. [`ParameterBinder::bind`] decides how each settable
//! property is exposed and attaches the matching [`clap::Arg`] to a command.
//! After parsing, [`ParameterBinding::resolve`] reads the property's value
//! out of the [`ArgMatches`].

use std::collections::HashMap;

use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::trace;

use crate::{
    error::{Error, Result},
    model::{BoundValue, ModelType, PropertyInfo},
    naming::to_kebab_case,
};

/// Spellings every generator command reserves for help.
const HELP_SPELLINGS: [&str; 3] = ["--help", "-h", "-?"];

/// Argument id of the help argument. Property ids live under `prop:`.
const HELP_ID: &str = "kiln:help";

/// How a property appears on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// `--name`, no value; present means true.
    Flag,
    /// `--name <VALUE>`, exactly one value.
    Option,
    /// Positional value.
    Argument,
}

/// One model property bound to one command-line element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterBinding {
    property: String,
    kind: BindingKind,
    id: String,
    long: String,
    alias: Option<String>,
    template: String,
    description: String,
    value_name: &'static str,
    default_value: Option<String>,
    flag_default: bool,
}

impl ParameterBinding {
    fn for_property(property: &PropertyInfo) -> Self {
        let option = property.option.as_ref();
        let long = option
            .and_then(|o| o.name.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| to_kebab_case(&property.name));
        let alias = option.and_then(|o| o.alias.clone()).filter(|a| !a.is_empty());
        let default_value = option.and_then(|o| o.default.clone());

        let kind = if property.is_bool() {
            BindingKind::Flag
        } else if option.is_some() {
            BindingKind::Option
        } else {
            BindingKind::Argument
        };

        let description = match kind {
            BindingKind::Argument => property
                .argument
                .as_ref()
                .and_then(|a| a.description.clone()),
            _ => option.and_then(|o| o.description.clone()),
        }
        .unwrap_or_default();

        let template = match (kind, &alias) {
            (BindingKind::Argument, _) => long.clone(),
            (_, Some(alias)) => format!("--{long}|-{alias}"),
            (_, None) => format!("--{long}"),
        };

        let flag_default = kind == BindingKind::Flag
            && default_value
                .as_deref()
                .is_some_and(|d| d.trim().eq_ignore_ascii_case("true"));

        Self {
            property: property.name.clone(),
            kind,
            id: format!("prop:{}", property.name),
            long,
            alias,
            template,
            description,
            value_name: property.ty.value_name(),
            default_value,
            flag_default,
        }
    }

    /// Name of the bound model property.
    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn kind(&self) -> BindingKind {
        self.kind
    }

    pub fn is_flag(&self) -> bool {
        self.kind == BindingKind::Flag
    }

    /// Argument id inside the generator's command.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Spelling shown to users: `--name`, `--name|-n`, or a bare name for
    /// positional arguments.
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Every spelling this binding claims on the command line.
    fn spellings(&self) -> Vec<String> {
        match self.kind {
            BindingKind::Argument => vec![format!("<{}>", self.long)],
            _ => {
                let mut spellings = vec![format!("--{}", self.long)];
                if let Some(alias) = &self.alias {
                    spellings.push(alias_spelling(alias));
                }
                spellings
            }
        }
    }

    fn to_arg(&self) -> Arg {
        let arg = Arg::new(self.id.clone()).help(self.description.clone());

        match self.kind {
            BindingKind::Flag => self
                .with_alias(arg.long(self.long.clone()))
                .action(ArgAction::SetTrue),
            BindingKind::Option => {
                let arg = self
                    .with_alias(arg.long(self.long.clone()))
                    .action(ArgAction::Set)
                    .num_args(1)
                    .value_name(self.value_name);
                match &self.default_value {
                    Some(default) => arg.default_value(default.clone()),
                    None => arg,
                }
            }
            BindingKind::Argument => arg
                .action(ArgAction::Set)
                .required(false)
                .value_name(self.long.clone()),
        }
    }

    fn with_alias(&self, arg: Arg) -> Arg {
        let Some(alias) = self.alias.as_deref() else {
            return arg;
        };
        match single_char(alias) {
            Some(short) => arg.short(short),
            None => arg.visible_alias(alias.to_string()),
        }
    }

    /// Read this binding's value from parsed arguments.
    ///
    /// Flags resolve to whether they were given (always true when declared
    /// with a true default), options to their value or declared default or
    /// `""`, and arguments to their value or [`BoundValue::Absent`].
    pub fn resolve(&self, matches: &ArgMatches) -> BoundValue {
        match self.kind {
            BindingKind::Flag => {
                let given = matches
                    .try_get_one::<bool>(&self.id)
                    .ok()
                    .flatten()
                    .copied()
                    .unwrap_or(false);
                BoundValue::Flag(given || self.flag_default)
            }
            BindingKind::Option => BoundValue::Text(
                self.text(matches)
                    .or_else(|| self.default_value.clone())
                    .unwrap_or_default(),
            ),
            BindingKind::Argument => self
                .text(matches)
                .map_or(BoundValue::Absent, BoundValue::Text),
        }
    }

    fn text(&self, matches: &ArgMatches) -> Option<String> {
        matches
            .try_get_one::<String>(&self.id)
            .ok()
            .flatten()
            .cloned()
    }
}

fn single_char(alias: &str) -> Option<char> {
    let mut chars = alias.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn alias_spelling(alias: &str) -> String {
    if single_char(alias).is_some() {
        format!("-{alias}")
    } else {
        format!("--{alias}")
    }
}

/// The help argument every generator command carries: `-h`, `--help`, `-?`.
pub(crate) fn help_arg() -> Arg {
    Arg::new(HELP_ID)
        .short('h')
        .long("help")
        .short_alias('?')
        .action(ArgAction::Help)
        .help("Print help (also -?)")
}

/// Builds command-line arguments for input models.
pub struct ParameterBinder;

impl ParameterBinder {
    /// Attach one argument per settable property of `model` to `command`.
    ///
    /// Properties are visited in declaration order. The command gets the
    /// shared help argument in place of clap's own.
    pub fn bind(model: &ModelType, command: Command) -> Result<(Command, Vec<ParameterBinding>)> {
        let mut claimed: HashMap<String, String> = HELP_SPELLINGS
            .iter()
            .map(|s| (s.to_string(), "help".to_string()))
            .collect();
        let mut command = command.disable_help_flag(true).arg(help_arg());
        let mut bindings = Vec::new();

        for property in model.settable_properties() {
            let binding = ParameterBinding::for_property(property);

            for spelling in binding.spellings() {
                if claimed.insert(spelling.clone(), binding.property.clone()).is_some() {
                    return Err(Error::BindingConflict {
                        model: model.name().to_string(),
                        property: binding.property.clone(),
                        spelling,
                    });
                }
            }

            trace!(
                model = model.short_name(),
                property = %binding.property,
                kind = ?binding.kind,
                template = %binding.template,
                "bound property"
            );

            command = command.arg(binding.to_arg());
            bindings.push(binding);
        }

        Ok((command, bindings))
    }
}
