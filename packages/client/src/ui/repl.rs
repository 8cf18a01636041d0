//! Interactive loop over `rustyline`.

use std::sync::Arc;

use rustyline::{DefaultEditor, error::ReadlineError};

use crate::{
    config::ClientConfig,
    domain::TokenStore,
    error::ClientError,
    infrastructure::{FileTokenStore, HttpGateway},
};

use super::{
    app::{App, Flow},
    command::{Command, HELP},
};

/// Run the terminal client until `quit`, Ctrl-C or Ctrl-D.
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(config.token_file.clone()));
    let gateway = Arc::new(HttpGateway::new(config.base_url.clone(), tokens.clone())?);
    tracing::info!(
        base_url = %config.base_url,
        token_file = %config.token_file.display(),
        "starting client"
    );

    let mut app = App::new(gateway, tokens, config.base_url, config.viewport_width);
    let mut editor = DefaultEditor::new()?;

    println!("FeedsApp client. Type `help` for commands.");
    app.start().await;

    loop {
        println!("\n{}", app.render());
        let prompt = format!("{}> ", app.route());
        // readline blocks the thread; let the runtime move other tasks off it.
        let line = tokio::task::block_in_place(|| editor.readline(&prompt));

        let line = match line {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        if let Err(e) = editor.add_history_entry(line.as_str()) {
            tracing::debug!("failed to record history: {}", e);
        }

        match Command::parse(&line) {
            Ok(Some(Command::Help)) => println!("{HELP}"),
            Ok(Some(command)) => {
                if app.execute(command).await == Flow::Quit {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => println!("{e}"),
        }
    }

    tracing::info!("client stopped");
    Ok(())
}
