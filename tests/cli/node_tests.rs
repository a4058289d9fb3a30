use crate::common::{fixture_artifact, TestContext};
use contract_session_mock::{RpcReply, RpcStub};
use predicates::prelude::*;
use serde_json::{json, Value};
use tokio::runtime::Runtime;

const TX_HASH: &str = "0xabababababababababababababababababababababababababababababababab";

/// A node on network 1 with one account, serving the stub from its own runtime.
struct LocalNode {
    stub: RpcStub,
    _runtime: Runtime,
}

impl LocalNode {
    fn start<F>(overrides: F) -> Self
    where
        F: Fn(&str) -> Option<RpcReply> + Send + Sync + 'static,
    {
        let runtime = Runtime::new().expect("Failed to start runtime");
        let stub = runtime
            .block_on(RpcStub::start(move |method: &str, _params: &Value| {
                overrides(method).unwrap_or_else(|| default_reply(method))
            }))
            .expect("Failed to start JSON-RPC stub");
        Self {
            stub,
            _runtime: runtime,
        }
    }

    fn cmd(&self, ctx: &TestContext, command: &str) -> assert_cmd::Command {
        let mut cmd = ctx.cmd();
        cmd.arg(command)
            .arg("--artifact")
            .arg(fixture_artifact())
            .args(["--rpc-url", self.stub.url()]);
        cmd
    }
}

fn default_reply(method: &str) -> RpcReply {
    match method {
        "web3_clientVersion" => RpcReply::Result(json!("stub/1.0")),
        "eth_accounts" => RpcReply::Result(json!(["0x1111111111111111111111111111111111111111"])),
        "net_version" => RpcReply::Result(json!("1")),
        "eth_call" => RpcReply::Result(json!(format!("0x{:064x}", 1500))),
        other => RpcReply::error(-32601, &format!("the method {} does not exist", other)),
    }
}

#[test]
fn test_status_prints_bound_query_result() {
    let node = LocalNode::start(|_| None);
    let ctx = TestContext::default();
    node.cmd(&ctx, "status")
        .assert()
        .success()
        .stdout(predicate::str::contains("1500"));
}

#[test]
fn test_status_reports_failed_query() {
    let node = LocalNode::start(|method| {
        (method == "eth_call").then(|| RpcReply::error(3, "execution reverted: paused"))
    });
    let ctx = TestContext::default();
    node.cmd(&ctx, "status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Query failed"))
        .stdout(predicate::str::contains("paused"));
}

#[test]
fn test_artifact_load_is_logged_once() {
    let node = LocalNode::start(|_| None);
    let ctx = TestContext::default();
    node.cmd(&ctx, "status")
        .assert()
        .success()
        .stderr(predicate::function(|stderr: &str| {
            stderr.matches("Loading contract artifact").count() == 1
        }));
}

#[test]
fn test_submit_without_receipt_names_transaction() {
    let node = LocalNode::start(|method| match method {
        "eth_sendTransaction" => Some(RpcReply::Result(json!(TX_HASH))),
        "eth_getTransactionReceipt" => Some(RpcReply::error(-32603, "header not found")),
        _ => None,
    });
    let ctx = TestContext::default();
    node.cmd(&ctx, "submit")
        .assert()
        .failure()
        .stderr(predicate::str::contains(TX_HASH))
        .stderr(predicate::str::contains("Nothing was sent").not());
}
