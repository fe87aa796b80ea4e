use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("cart-cli").chain(args.iter().copied())).unwrap()
}

// =============================================================================
// Argument parsing
// =============================================================================

#[test]
fn add_maps_to_add_click() {
    let cli = parse(&["add", "42"]);
    assert_eq!(cli.command.as_click(), Some(("42", "add")));
    assert_eq!(cli.endpoint, "/update_item/");
}

#[test]
fn update_forwards_raw_action() {
    let cli = parse(&["update", "7", "wishlist"]);
    assert_eq!(cli.command.as_click(), Some(("7", "wishlist")));
}

#[test]
fn show_is_not_a_click() {
    assert_eq!(parse(&["show"]).command.as_click(), None);
}

#[test]
fn missing_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["cart-cli"]).is_err());
}

// =============================================================================
// Session selection
// =============================================================================

#[test]
fn no_session_id_means_guest() {
    let cli = parse(&["add", "1"]);
    assert!(!session_from_cli(&cli).unwrap().is_authenticated);
}

#[test]
fn session_id_requires_csrf_token() {
    let cli = parse(&["--session-id", "abc", "add", "1"]);
    assert!(matches!(session_from_cli(&cli), Err(CliError::MissingCsrfToken)));
}

#[test]
fn session_id_with_token_is_authenticated() {
    let cli = parse(&["--session-id", "abc", "--csrf-token", "tok", "remove", "1"]);
    assert_eq!(session_from_cli(&cli).unwrap(), SessionContext::authenticated("tok"));
}

// =============================================================================
// run: guest path touches only the data dir
// =============================================================================

#[tokio::test]
async fn guest_add_then_remove_updates_cart_file() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().to_str().unwrap();

    run(parse(&["--data-dir", data_dir, "add", "42"])).await.unwrap();
    run(parse(&["--data-dir", data_dir, "add", "42"])).await.unwrap();
    run(parse(&["--data-dir", data_dir, "remove", "42"])).await.unwrap();

    let raw = std::fs::read_to_string(dir.path().join("cart.json")).unwrap();
    assert_eq!(raw, r#"{"42":{"quantity":1}}"#);

    run(parse(&["--data-dir", data_dir, "show"])).await.unwrap();
}

#[tokio::test]
async fn guest_update_fails_when_cart_file_cannot_be_written() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();
    let data_dir = blocker.join("sub");

    let err = run(parse(&["--data-dir", data_dir.to_str().unwrap(), "add", "42"])).await.unwrap_err();

    assert!(matches!(&err, CliError::GuestCartNotSaved(path) if *path == data_dir));
    assert!(err.to_string().contains("sub"));
}

#[tokio::test]
async fn authenticated_update_against_dead_server_fails() {
    let dir = tempfile::tempdir().unwrap();
    let cli = parse(&[
        "--base-url",
        "http://127.0.0.1:9",
        "--session-id",
        "abc",
        "--csrf-token",
        "tok",
        "--data-dir",
        dir.path().to_str().unwrap(),
        "add",
        "7",
    ]);

    let err = run(cli).await.unwrap_err();
    assert!(matches!(err, CliError::Sync(SyncError::Transport(_))));
    assert!(!dir.path().join("cart.json").exists());
}
