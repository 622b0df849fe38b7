use anyhow::bail;

use mahzan_core::entities::{AffiliatePublication, Issue, UserProfile};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Handle `mhz schema`: dump the JSON schema for a stored record type.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = match args.type_name.as_str() {
        "issue" => schemars::schema_for!(Issue),
        "affiliate" => schemars::schema_for!(AffiliatePublication),
        "profile" => schemars::schema_for!(UserProfile),
        other => bail!("unknown type {other:?} (expected issue, affiliate, or profile)"),
    };
    output(&schema, flags.format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn flags() -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            limit: None,
            quiet: false,
            verbose: false,
        }
    }

    #[test]
    fn known_types_dump_schemas() {
        for type_name in ["issue", "affiliate", "profile"] {
            let args = SchemaArgs {
                type_name: type_name.to_string(),
            };
            assert!(handle(&args, &flags()).is_ok());
        }
    }

    #[test]
    fn unknown_type_is_an_error() {
        let args = SchemaArgs {
            type_name: "widget".to_string(),
        };
        assert!(handle(&args, &flags()).is_err());
    }
}
