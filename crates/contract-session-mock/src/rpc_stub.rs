use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Answer to one JSON-RPC request
#[derive(Debug, Clone)]
pub enum RpcReply {
    Result(Value),
    Error { code: i64, message: String },
}

impl RpcReply {
    pub fn error(code: i64, message: &str) -> Self {
        RpcReply::Error {
            code,
            message: message.to_string(),
        }
    }

    fn into_envelope(self, id: Value) -> Value {
        match self {
            RpcReply::Result(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
            RpcReply::Error { code, message } => json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": code, "message": message }
            }),
        }
    }
}

type Handler = dyn Fn(&str, &Value) -> RpcReply + Send + Sync;

/// JSON-RPC endpoint on a local port, answering through a handler.
///
/// Every request is recorded as `(method, params)`. The server stops when the
/// stub is dropped.
pub struct RpcStub {
    url: String,
    requests: Arc<Mutex<Vec<(String, Value)>>>,
    server: JoinHandle<()>,
}

impl RpcStub {
    pub async fn start<F>(handler: F) -> std::io::Result<Self>
    where
        F: Fn(&str, &Value) -> RpcReply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let url = format!("http://{}", listener.local_addr()?);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handler: Arc<Handler> = Arc::new(handler);

        let log = requests.clone();
        let server = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(serve_connection(stream, handler.clone(), log.clone()));
            }
        });

        Ok(Self {
            url,
            requests,
            server,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Every request so far, in order
    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Params of every request for `method`
    pub fn params_of(&self, method: &str) -> Vec<Value> {
        self.requests()
            .into_iter()
            .filter(|(m, _)| m == method)
            .map(|(_, params)| params)
            .collect()
    }
}

impl Drop for RpcStub {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Serve keep-alive HTTP/1.1 POSTs on one connection until the client hangs up.
async fn serve_connection(
    stream: TcpStream,
    handler: Arc<Handler>,
    log: Arc<Mutex<Vec<(String, Value)>>>,
) {
    let mut reader = BufReader::new(stream);
    loop {
        let mut content_length = 0usize;
        let mut line = String::new();
        loop {
            line.clear();
            match reader.read_line(&mut line).await {
                Ok(0) | Err(_) => return,
                Ok(_) => {}
            }
            let header = line.trim_end();
            if header.is_empty() {
                break;
            }
            if let Some((name, value)) = header.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap_or(0);
                }
            }
        }

        let mut body = vec![0u8; content_length];
        if reader.read_exact(&mut body).await.is_err() {
            return;
        }
        let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        let method = request["method"].as_str().unwrap_or_default().to_string();
        let params = request["params"].clone();
        log.lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((method.clone(), params.clone()));

        let payload = handler(&method, &params)
            .into_envelope(request["id"].clone())
            .to_string();
        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\n\r\n{}",
            payload.len(),
            payload
        );
        if reader.get_mut().write_all(response.as_bytes()).await.is_err() {
            return;
        }
    }
}
