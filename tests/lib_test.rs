//! Library integration tests.

use recite::ReciteError;

#[test]
fn error_types_are_public() {
    let err = ReciteError::GitCommand {
        args: "push origin v1.0.0".into(),
        stderr: "rejected".into(),
    };
    assert!(err.to_string().contains("rejected"));
    assert!(ReciteError::Aborted.is_abort());
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> recite::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use recite::cli::{Cli, Commands};

    let cli = Cli::parse_from(["recite", "list-checks", "--json"]);
    if let Commands::ListChecks(args) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected ListChecks command");
    }
}
