// ABOUTME: In-process HTTP doubles for a JSON-RPC node and an Etherscan-style explorer.
// ABOUTME: Each serves scripted replies on a loopback port and records what it was asked.

use alloy_core::primitives::{Address, TxHash, keccak256};
use alloy_core::rlp::{Decodable, EMPTY_STRING_CODE, Header};
use axum::extract::{Form, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

async fn serve(router: Router, path: &str) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Url::parse(&format!("http://{addr}{path}")).unwrap()
}

// =============================================================================
// JSON-RPC node
// =============================================================================

/// How the fake node answers.
#[derive(Debug, Clone)]
pub struct NodeScript {
    pub chain_id: u64,
    /// Transaction count of the deployer before the first send.
    pub start_nonce: u64,
    /// Zero-based send attempt answered with an "insufficient funds" error.
    pub reject_send: Option<usize>,
    /// Receipt polls answered with `null` before the receipt appears.
    pub receipt_delay: usize,
    /// Zero-based accepted transaction mined with status 0x0.
    pub revert_tx: Option<usize>,
    pub omit_contract_address: bool,
    pub never_confirm: bool,
}

impl Default for NodeScript {
    fn default() -> Self {
        Self {
            chain_id: 4002,
            start_nonce: 0,
            reject_send: None,
            receipt_delay: 0,
            revert_tx: None,
            omit_contract_address: false,
            never_confirm: false,
        }
    }
}

#[derive(Debug)]
struct SentTx {
    hash: TxHash,
    nonce: u64,
    creation: bool,
    polls: usize,
}

#[derive(Debug, Default)]
struct NodeState {
    methods: Vec<String>,
    send_attempts: usize,
    sent: Vec<SentTx>,
}

#[derive(Clone)]
struct NodeShared {
    script: Arc<NodeScript>,
    state: Arc<Mutex<NodeState>>,
}

pub struct FakeNode {
    pub url: Url,
    shared: NodeShared,
}

/// Address the fake node assigns to the `index`-th accepted creation.
pub fn created_address(index: usize) -> Address {
    Address::repeat_byte(0x20 + index as u8)
}

impl FakeNode {
    pub async fn start(script: NodeScript) -> Self {
        let shared = NodeShared {
            script: Arc::new(script),
            state: Arc::default(),
        };
        let router = Router::new()
            .route("/", post(rpc))
            .with_state(shared.clone());
        let url = serve(router, "/").await;
        Self { url, shared }
    }

    /// Number of requests for `method`.
    pub fn count(&self, method: &str) -> usize {
        self.shared
            .state
            .lock()
            .methods
            .iter()
            .filter(|m| *m == method)
            .count()
    }

    /// Nonces of accepted transactions, in send order.
    pub fn sent_nonces(&self) -> Vec<u64> {
        self.shared.state.lock().sent.iter().map(|tx| tx.nonce).collect()
    }

    pub fn sent_hashes(&self) -> Vec<TxHash> {
        self.shared.state.lock().sent.iter().map(|tx| tx.hash).collect()
    }
}

fn quantity(value: u64) -> Value {
    json!(format!("{value:#x}"))
}

/// Nonce and creation flag of a signed legacy transaction.
fn decode_raw(raw: &str) -> (u64, bool) {
    let bytes = hex::decode(raw.trim_start_matches("0x")).unwrap();
    let mut buf = bytes.as_slice();
    Header::decode(&mut buf).unwrap();
    let nonce = u64::decode(&mut buf).unwrap();
    let _gas_price = u128::decode(&mut buf).unwrap();
    let _gas_limit = u64::decode(&mut buf).unwrap();
    (nonce, buf.first() == Some(&EMPTY_STRING_CODE))
}

async fn rpc(State(node): State<NodeShared>, Json(request): Json<Value>) -> Json<Value> {
    let id = request["id"].clone();
    let method = request["method"].as_str().unwrap_or_default().to_string();
    let params = request["params"].clone();
    let script = &node.script;
    let mut state = node.state.lock();
    state.methods.push(method.clone());

    let reply = match method.as_str() {
        "eth_chainId" => Ok(quantity(script.chain_id)),
        "eth_gasPrice" => Ok(quantity(1_000_000_000)),
        "eth_estimateGas" => Ok(quantity(21_000)),
        "eth_getTransactionCount" => Ok(quantity(script.start_nonce + state.sent.len() as u64)),
        "eth_sendRawTransaction" => {
            let attempt = state.send_attempts;
            state.send_attempts += 1;
            if script.reject_send == Some(attempt) {
                Err(json!({
                    "code": -32000,
                    "message": "insufficient funds for gas * price + value",
                }))
            } else {
                let raw = params[0].as_str().unwrap_or_default();
                let (nonce, creation) = decode_raw(raw);
                let hash = keccak256(hex::decode(raw.trim_start_matches("0x")).unwrap());
                state.sent.push(SentTx {
                    hash,
                    nonce,
                    creation,
                    polls: 0,
                });
                Ok(json!(hash))
            }
        }
        "eth_getTransactionReceipt" => {
            let hash: TxHash = serde_json::from_value(params[0].clone()).unwrap();
            let omit = script.omit_contract_address;
            let never = script.never_confirm;
            let delay = script.receipt_delay;
            let revert = script.revert_tx;
            let creations_before = |index: usize, sent: &[SentTx]| {
                sent[..index].iter().filter(|tx| tx.creation).count()
            };
            match state.sent.iter().position(|tx| tx.hash == hash) {
                None => Ok(Value::Null),
                Some(index) => {
                    let created = created_address(creations_before(index, &state.sent));
                    let tx = &mut state.sent[index];
                    if never || tx.polls < delay {
                        tx.polls += 1;
                        Ok(Value::Null)
                    } else {
                        let address = (tx.creation && !omit).then_some(created);
                        let status = if revert == Some(index) { "0x0" } else { "0x1" };
                        Ok(json!({
                            "transactionHash": tx.hash,
                            "contractAddress": address,
                            "blockNumber": quantity(100 + index as u64),
                            "gasUsed": quantity(21_000),
                            "status": status,
                        }))
                    }
                }
            }
        }
        other => Err(json!({"code": -32601, "message": format!("method {other} not found")})),
    };

    Json(match reply {
        Ok(result) => json!({"jsonrpc": "2.0", "id": id, "result": result}),
        Err(error) => json!({"jsonrpc": "2.0", "id": id, "error": error}),
    })
}

// =============================================================================
// Explorer
// =============================================================================

pub const GUID: &str = "ezq878u486pzijkvvmerl6a9mzwhv6sefgvqi5tkwceejc7tvn";

#[derive(Debug, Clone)]
pub enum SubmitReply {
    Queued,
    AlreadyVerified,
    Rejected(String),
}

#[derive(Debug, Clone)]
pub struct ExplorerScript {
    /// `getsourcecode` reports published sources for every address.
    pub verified_source: bool,
    pub submit: SubmitReply,
    /// `checkverifystatus` calls answered "Pending in queue" before the verdict.
    pub pending_checks: usize,
    pub verdict: String,
}

impl Default for ExplorerScript {
    fn default() -> Self {
        Self {
            verified_source: false,
            submit: SubmitReply::Queued,
            pending_checks: 0,
            verdict: "Pass - Verified".to_string(),
        }
    }
}

#[derive(Debug, Default)]
struct ExplorerState {
    queries: Vec<HashMap<String, String>>,
    submissions: Vec<HashMap<String, String>>,
    checks: usize,
}

#[derive(Clone)]
struct ExplorerShared {
    script: Arc<ExplorerScript>,
    state: Arc<Mutex<ExplorerState>>,
}

pub struct FakeExplorer {
    pub url: Url,
    shared: ExplorerShared,
}

impl FakeExplorer {
    pub async fn start(script: ExplorerScript) -> Self {
        let shared = ExplorerShared {
            script: Arc::new(script),
            state: Arc::default(),
        };
        let router = Router::new()
            .route("/api", get(explorer_query).post(explorer_submit))
            .with_state(shared.clone());
        let url = serve(router, "/api").await;
        Self { url, shared }
    }

    pub fn submissions(&self) -> Vec<HashMap<String, String>> {
        self.shared.state.lock().submissions.clone()
    }

    pub fn queries(&self) -> Vec<HashMap<String, String>> {
        self.shared.state.lock().queries.clone()
    }

    pub fn checks(&self) -> usize {
        self.shared.state.lock().checks
    }
}

fn api(ok: bool, result: Value) -> Json<Value> {
    Json(json!({
        "status": if ok { "1" } else { "0" },
        "message": if ok { "OK" } else { "NOTOK" },
        "result": result,
    }))
}

async fn explorer_query(
    State(explorer): State<ExplorerShared>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let script = &explorer.script;
    let mut state = explorer.state.lock();
    state.queries.push(query.clone());

    match query.get("action").map(String::as_str) {
        Some("getsourcecode") => {
            let source = if script.verified_source {
                "contract Vendao {}"
            } else {
                ""
            };
            api(true, json!([{"SourceCode": source, "ContractName": ""}]))
        }
        Some("checkverifystatus") => {
            state.checks += 1;
            if state.checks <= script.pending_checks {
                api(false, json!("Pending in queue"))
            } else {
                api(script.verdict.starts_with("Pass"), json!(script.verdict))
            }
        }
        _ => api(false, json!("Error! Missing or invalid action name")),
    }
}

async fn explorer_submit(
    State(explorer): State<ExplorerShared>,
    Form(form): Form<HashMap<String, String>>,
) -> Json<Value> {
    explorer.state.lock().submissions.push(form);
    match &explorer.script.submit {
        SubmitReply::Queued => api(true, json!(GUID)),
        SubmitReply::AlreadyVerified => api(false, json!("Contract source code already verified")),
        SubmitReply::Rejected(reason) => api(false, json!(reason)),
    }
}
