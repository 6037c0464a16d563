//! Out-of-process collaborators: the query parser and the runtime model dump.

use crate::error::{Result, StormscopeError};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::io::{BufReader, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use stormscope_api::error::{ApiError, ApiResult};
use stormscope_api::models::SyntaxNode;
use stormscope_api::parser::{QueryParser, SyntaxError};
use stormscope_api::runtime::ModelDump;

/// Parses by running an external program: the query source is written to its
/// stdin and it answers on stdout with either the JSON syntax tree or
/// `{"error": {"message", "line", "column", "token"}}`.
#[derive(Debug, Clone)]
pub struct CommandParser {
    program: String,
    args: Vec<String>,
}

#[derive(Debug)]
enum ParserReply {
    Failure { error: SyntaxError },
    Tree(SyntaxNode),
}

#[derive(Deserialize)]
struct Failure {
    error: SyntaxError,
}

impl CommandParser {
    /// Splits `command_line` on whitespace into a program and its arguments.
    pub fn new(command_line: &str) -> ApiResult<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| ApiError::ParserUnavailable("empty parser command".to_string()))?;

        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    fn run(&self, source: &str) -> std::result::Result<Vec<u8>, String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| format!("failed to start {}: {}", self.program, e))?;

        // stdin is fed from its own thread while stdout and stderr drain here
        let stdin = child.stdin.take();
        let input = source.as_bytes().to_vec();
        let writer = std::thread::Builder::new()
            .name("parser-stdin".to_string())
            .spawn(move || match stdin {
                // dropping the handle closes the pipe
                Some(mut stdin) => stdin.write_all(&input),
                None => Ok(()),
            });

        let writer = match writer {
            Ok(writer) => writer,
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(format!("failed to feed {}: {}", self.program, e));
            }
        };

        let output = child
            .wait_with_output()
            .map_err(|e| format!("{} did not finish: {}", self.program, e))?;

        match writer.join() {
            Ok(Ok(())) => {}
            // the parser may answer without reading everything
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
            Ok(Err(e)) => return Err(format!("failed to write to {}: {}", self.program, e)),
            Err(_) => return Err(format!("failed to write to {}", self.program)),
        }

        if !output.status.success() && output.stdout.is_empty() {
            return Err(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        Ok(output.stdout)
    }
}

/// Decodes the parser's answer. Trees nest two JSON levels per node, so the
/// recursion limit is lifted and the stack grows on demand instead.
fn decode_reply(stdout: &[u8]) -> serde_json::Result<ParserReply> {
    if let Ok(Failure { error }) = decode_deep::<Failure>(stdout) {
        return Ok(ParserReply::Failure { error });
    }
    decode_deep::<SyntaxNode>(stdout).map(ParserReply::Tree)
}

fn decode_deep<T: DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<T> {
    let mut json = serde_json::Deserializer::from_slice(bytes);
    json.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    Ok(value)
}

impl QueryParser for CommandParser {
    fn parse(&self, source: &str) -> std::result::Result<SyntaxNode, SyntaxError> {
        let reply = self
            .run(source)
            .and_then(|stdout| {
                decode_reply(&stdout).map_err(|e| format!("unreadable parser output: {e}"))
            })
            .map_err(|message| {
                tracing::error!("Parser failure: {}", message);
                SyntaxError {
                    message,
                    line: 1,
                    column: 1,
                    token: None,
                }
            })?;

        match reply {
            ParserReply::Tree(tree) => Ok(tree),
            ParserReply::Failure { error } => Err(error),
        }
    }
}

/// Reads a runtime model dump from a JSON file.
pub fn load_model_dump(path: &Path) -> Result<ModelDump> {
    let file = std::fs::File::open(path).map_err(|e| {
        StormscopeError::Model(format!("cannot open {}: {}", path.display(), e))
    })?;
    let dump = serde_json::from_reader(BufReader::new(file))?;
    Ok(dump)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_command_is_unavailable() {
        assert!(matches!(
            CommandParser::new("   "),
            Err(ApiError::ParserUnavailable(_))
        ));
    }

    #[test]
    fn replies_distinguish_errors_from_trees() {
        let reply = decode_reply(
            br#"{"error": {"message": "Unexpected token", "line": 3, "column": 7, "token": "]"}}"#,
        )
        .unwrap();
        assert!(matches!(reply, ParserReply::Failure { ref error } if error.line == 3));

        let reply = decode_reply(br#"{"kind": {"type": "query"}, "children": []}"#).unwrap();
        assert!(matches!(reply, ParserReply::Tree(_)));

        assert!(decode_reply(br#"{"kind": {"type": "query"}} trailing"#).is_err());
    }

    /// `depth` nested subqueries around one constant.
    fn nested_tree(depth: usize) -> String {
        let mut json = r#"{"kind": {"type": "const"}, "text": "leaf"}"#.to_string();
        for _ in 0..depth {
            json = format!(r#"{{"kind": {{"type": "sub_query"}}, "children": [{json}]}}"#);
        }
        json
    }

    #[test]
    fn deep_trees_decode() {
        let reply = decode_reply(nested_tree(500).as_bytes()).unwrap();
        let ParserReply::Tree(mut node) = reply else {
            panic!("expected a tree");
        };
        let mut depth = 0;
        while let Some(kid) = node.children.pop() {
            node = kid;
            depth += 1;
        }
        assert_eq!(depth, 500);
        assert_eq!(node.text, "leaf");
    }

    #[cfg(unix)]
    #[test]
    fn cat_echoes_a_tree_back() {
        let parser = CommandParser::new("cat").unwrap();
        let tree = parser
            .parse(r#"{"kind": {"type": "query"}, "text": "inet:fqdn"}"#)
            .unwrap();
        assert_eq!(tree.text, "inet:fqdn");
    }

    #[cfg(unix)]
    #[test]
    fn large_sources_do_not_stall_the_pipes() {
        let parser = CommandParser::new("cat").unwrap();
        let text = "a".repeat(1 << 20);
        let source = format!(r#"{{"kind": {{"type": "query"}}, "text": "{text}"}}"#);

        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let _ = tx.send(parser.parse(&source));
        });

        let tree = rx
            .recv_timeout(std::time::Duration::from_secs(10))
            .expect("parser must answer")
            .unwrap();
        assert_eq!(tree.text.len(), 1 << 20);
    }

    #[test]
    fn missing_program_becomes_a_syntax_error() {
        let parser = CommandParser::new("stormscope-no-such-parser-binary").unwrap();
        let err = parser.parse("inet:fqdn").unwrap_err();
        assert_eq!((err.line, err.column), (1, 1));
    }
}
