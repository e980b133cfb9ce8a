use anyhow::Context;
use clap::Subcommand;
use codenav_core::Cursor;
use std::io::Read;

#[derive(Subcommand)]
pub enum CursorCommand {
    /// Print the JSON state behind a cursor token
    Decode {
        #[arg(value_name = "TOKEN")]
        token: String,
    },
    /// Build a cursor token from its JSON state (`-` reads stdin)
    Encode {
        #[arg(value_name = "JSON")]
        json: String,
    },
    /// Print the JSON schema of cursor state
    Schema,
}

pub fn run(command: CursorCommand) -> anyhow::Result<String> {
    match command {
        CursorCommand::Decode { token } => decode(&token),
        CursorCommand::Encode { json } => {
            let json = if json == "-" {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("failed to read cursor from stdin")?;
                buf
            } else {
                json
            };
            encode(&json)
        }
        CursorCommand::Schema => schema(),
    }
}

fn decode(token: &str) -> anyhow::Result<String> {
    let cursor = Cursor::decode(token.trim())?;
    tracing::debug!(phase = cursor.phase(), dump_id = cursor.dump_id(), "decoded cursor");
    Ok(serde_json::to_string_pretty(&cursor)?)
}

fn encode(json: &str) -> anyhow::Result<String> {
    let cursor: Cursor = serde_json::from_str(json).context("invalid cursor JSON")?;
    // Round trip through decode so impossible batch counters are refused here too.
    let token = cursor.encode()?;
    Cursor::decode(&token)?;
    Ok(token)
}

fn schema() -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&schemars::schema_for!(Cursor))?)
}
