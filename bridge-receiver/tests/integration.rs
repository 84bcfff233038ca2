//! Integration tests for the bridge receiver in pull mode using cw-multi-test.
//!
//! These tests cover receipt, deduplication, the pending queue and claims.

use cosmwasm_std::{from_json, Addr, Binary};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};

use bridge_receiver::msg::{
    ClaimAllMessagesResponse, ClaimMessageResponse, ConfigResponse, ExecuteMsg, InstantiateMsg,
    IsMessageClaimedResponse, IsMessageProcessedResponse, MessageResponse, PendingCountResponse,
    PendingMessagesResponse, QueryMsg, StatsResponse,
};
use bridge_receiver::{ContractError, DeliveryMode};
use common::BridgeMessage;

// ============================================================================
// Test Setup
// ============================================================================

fn contract_receiver() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    let contract = ContractWrapper::new(
        bridge_receiver::contract::execute,
        bridge_receiver::contract::instantiate,
        bridge_receiver::contract::query,
    )
    .with_reply(bridge_receiver::contract::reply);
    Box::new(contract)
}

fn setup() -> (App, Addr, Addr, Addr) {
    let mut app = App::default();

    let owner = Addr::unchecked("terra1owner");
    let relayer = Addr::unchecked("terra1relayer");

    let code_id = app.store_code(contract_receiver());

    let contract_addr = app
        .instantiate_contract(
            code_id,
            owner.clone(),
            &InstantiateMsg {
                owner: None,
                delivery_mode: DeliveryMode::Pull,
                relayers: vec![relayer.to_string()],
            },
            &[],
            "bridge-receiver",
            Some(owner.to_string()),
        )
        .unwrap();

    (app, contract_addr, owner, relayer)
}

fn receive(
    app: &mut App,
    relayer: &Addr,
    contract_addr: &Addr,
    message_id: &str,
    target_contract: &str,
    data: &[u8],
) -> anyhow::Result<AppResponse> {
    app.execute_contract(
        relayer.clone(),
        contract_addr.clone(),
        &ExecuteMsg::ReceiveMessage {
            message_id: message_id.to_string(),
            source_chain_id: 1,
            source_sender: "0xAA".to_string(),
            target_contract: target_contract.to_string(),
            data: Binary::from(data.to_vec()),
        },
        &[],
    )
}

fn pending(app: &App, contract_addr: &Addr, target_contract: &str) -> Vec<String> {
    let res: PendingMessagesResponse = app
        .wrap()
        .query_wasm_smart(
            contract_addr,
            &QueryMsg::PendingMessages {
                target_contract: target_contract.to_string(),
            },
        )
        .unwrap();
    res.message_ids
}

fn is_processed(app: &App, contract_addr: &Addr, message_id: &str) -> bool {
    let res: IsMessageProcessedResponse = app
        .wrap()
        .query_wasm_smart(
            contract_addr,
            &QueryMsg::IsMessageProcessed {
                message_id: message_id.to_string(),
            },
        )
        .unwrap();
    res.processed
}

fn is_claimed(app: &App, contract_addr: &Addr, message_id: &str) -> bool {
    let res: IsMessageClaimedResponse = app
        .wrap()
        .query_wasm_smart(
            contract_addr,
            &QueryMsg::IsMessageClaimed {
                message_id: message_id.to_string(),
            },
        )
        .unwrap();
    res.claimed
}

// ============================================================================
// Instantiate
// ============================================================================

#[test]
fn test_instantiate_defaults_owner_to_sender() {
    let (app, contract_addr, owner, _) = setup();

    let config: ConfigResponse = app
        .wrap()
        .query_wasm_smart(&contract_addr, &QueryMsg::Config {})
        .unwrap();
    assert_eq!(config.owner, owner);
    assert_eq!(config.delivery_mode, DeliveryMode::Pull);

    let stats: StatsResponse = app
        .wrap()
        .query_wasm_smart(&contract_addr, &QueryMsg::Stats {})
        .unwrap();
    assert_eq!(stats.total_received, 0);
    assert_eq!(stats.total_claimed, 0);
}

// ============================================================================
// Receive
// ============================================================================

#[test]
fn test_receive_then_claim_all_scenario() {
    let (mut app, contract_addr, _, relayer) = setup();

    receive(&mut app, &relayer, &contract_addr, "m1", "0xBB", b"hello").unwrap();

    assert!(is_processed(&app, &contract_addr, "m1"));
    assert_eq!(pending(&app, &contract_addr, "0xBB"), vec!["m1".to_string()]);

    let res = app
        .execute_contract(
            Addr::unchecked("terra1recipient"),
            contract_addr.clone(),
            &ExecuteMsg::ClaimAllMessages {
                target_contract: "0xBB".to_string(),
            },
            &[],
        )
        .unwrap();

    let claimed: ClaimAllMessagesResponse = from_json(res.data.unwrap()).unwrap();
    assert_eq!(
        claimed.messages,
        vec![BridgeMessage {
            message_id: "m1".to_string(),
            source_chain_id: 1,
            source_sender: "0xAA".to_string(),
            data: Binary::from(b"hello".to_vec()),
        }]
    );

    assert!(pending(&app, &contract_addr, "0xBB").is_empty());
    assert!(is_claimed(&app, &contract_addr, "m1"));
    // Still processed: the record is the replay guard
    assert!(is_processed(&app, &contract_addr, "m1"));
}

#[test]
fn test_duplicate_message_rejected_regardless_of_payload() {
    let (mut app, contract_addr, _, relayer) = setup();

    receive(&mut app, &relayer, &contract_addr, "m1", "0xbb", b"hello").unwrap();

    let res = receive(&mut app, &relayer, &contract_addr, "m1", "0xcc", b"different");
    assert!(res.is_err());
    assert_eq!(
        res.unwrap_err().root_cause().to_string(),
        ContractError::DuplicateMessage {
            message_id: "m1".to_string()
        }
        .to_string()
    );

    // Original record and queue untouched
    let msg: MessageResponse = app
        .wrap()
        .query_wasm_smart(
            &contract_addr,
            &QueryMsg::Message {
                message_id: "m1".to_string(),
            },
        )
        .unwrap();
    let msg = msg.message.unwrap();
    assert_eq!(msg.target_contract, "0xbb");
    assert_eq!(msg.data, Binary::from(b"hello".to_vec()));
    assert!(pending(&app, &contract_addr, "0xcc").is_empty());
}

#[test]
fn test_duplicate_rejected_after_claim() {
    let (mut app, contract_addr, _, relayer) = setup();

    receive(&mut app, &relayer, &contract_addr, "m1", "0xbb", b"hello").unwrap();
    app.execute_contract(
        relayer.clone(),
        contract_addr.clone(),
        &ExecuteMsg::ClaimMessage {
            message_id: "m1".to_string(),
        },
        &[],
    )
    .unwrap();

    let res = receive(&mut app, &relayer, &contract_addr, "m1", "0xbb", b"hello");
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(
        err_str.contains("already received"),
        "Expected duplicate error, got: {}",
        err_str
    );
}

#[test]
fn test_unauthorized_relayer_changes_nothing() {
    let (mut app, contract_addr, _, _) = setup();
    let intruder = Addr::unchecked("terra1intruder");

    let res = receive(&mut app, &intruder, &contract_addr, "m1", "0xbb", b"hello");
    assert_eq!(
        res.unwrap_err().root_cause().to_string(),
        ContractError::UnauthorizedRelayer {
            relayer: "terra1intruder".to_string()
        }
        .to_string()
    );

    assert!(!is_processed(&app, &contract_addr, "m1"));
    assert!(pending(&app, &contract_addr, "0xbb").is_empty());

    let stats: StatsResponse = app
        .wrap()
        .query_wasm_smart(&contract_addr, &QueryMsg::Stats {})
        .unwrap();
    assert_eq!(stats.total_received, 0);
}

#[test]
fn test_empty_message_id_rejected() {
    let (mut app, contract_addr, _, relayer) = setup();

    let res = receive(&mut app, &relayer, &contract_addr, "", "0xbb", b"hello");
    assert_eq!(
        res.unwrap_err().root_cause().to_string(),
        ContractError::InvalidMessageId.to_string()
    );
}

#[test]
fn test_unknown_message_is_absent_not_error() {
    let (app, contract_addr, _, _) = setup();

    let msg: MessageResponse = app
        .wrap()
        .query_wasm_smart(
            &contract_addr,
            &QueryMsg::Message {
                message_id: "never".to_string(),
            },
        )
        .unwrap();
    assert!(msg.message.is_none());
    assert!(!is_processed(&app, &contract_addr, "never"));
    assert!(!is_claimed(&app, &contract_addr, "never"));
}

// ============================================================================
// Pending Queue
// ============================================================================

#[test]
fn test_recipient_keys_are_case_insensitive() {
    let (mut app, contract_addr, _, relayer) = setup();

    receive(&mut app, &relayer, &contract_addr, "m1", "0xAbCd", b"one").unwrap();
    receive(&mut app, &relayer, &contract_addr, "m2", "0xabcd", b"two").unwrap();

    let expected = vec!["m1".to_string(), "m2".to_string()];
    assert_eq!(pending(&app, &contract_addr, "0xABCD"), expected);
    assert_eq!(pending(&app, &contract_addr, "0xabcd"), expected);

    let count: PendingCountResponse = app
        .wrap()
        .query_wasm_smart(
            &contract_addr,
            &QueryMsg::PendingCount {
                target_contract: "0xAbCd".to_string(),
            },
        )
        .unwrap();
    assert_eq!(count.count, 2);
}

#[test]
fn test_queues_are_per_recipient() {
    let (mut app, contract_addr, _, relayer) = setup();

    receive(&mut app, &relayer, &contract_addr, "a1", "0xaa01", b"a").unwrap();
    receive(&mut app, &relayer, &contract_addr, "b1", "0xbb01", b"b").unwrap();
    receive(&mut app, &relayer, &contract_addr, "a2", "0xaa01", b"a").unwrap();

    assert_eq!(
        pending(&app, &contract_addr, "0xaa01"),
        vec!["a1".to_string(), "a2".to_string()]
    );
    assert_eq!(pending(&app, &contract_addr, "0xbb01"), vec!["b1".to_string()]);
    assert!(pending(&app, &contract_addr, "0xcc01").is_empty());
}

// ============================================================================
// Claims
// ============================================================================

#[test]
fn test_claim_message_twice_fails() {
    let (mut app, contract_addr, _, relayer) = setup();
    receive(&mut app, &relayer, &contract_addr, "m1", "0xbb", b"hello").unwrap();

    let claimer = Addr::unchecked("terra1anyone");
    let res = app
        .execute_contract(
            claimer.clone(),
            contract_addr.clone(),
            &ExecuteMsg::ClaimMessage {
                message_id: "m1".to_string(),
            },
            &[],
        )
        .unwrap();

    let claimed: ClaimMessageResponse = from_json(res.data.unwrap()).unwrap();
    assert_eq!(claimed.message.message_id, "m1");
    assert_eq!(claimed.message.data, Binary::from(b"hello".to_vec()));
    assert!(is_claimed(&app, &contract_addr, "m1"));

    let res = app.execute_contract(
        claimer,
        contract_addr.clone(),
        &ExecuteMsg::ClaimMessage {
            message_id: "m1".to_string(),
        },
        &[],
    );
    assert_eq!(
        res.unwrap_err().root_cause().to_string(),
        ContractError::AlreadyClaimed {
            message_id: "m1".to_string()
        }
        .to_string()
    );
}

#[test]
fn test_claim_unknown_message_not_found() {
    let (mut app, contract_addr, _, _) = setup();

    let res = app.execute_contract(
        Addr::unchecked("terra1anyone"),
        contract_addr.clone(),
        &ExecuteMsg::ClaimMessage {
            message_id: "missing".to_string(),
        },
        &[],
    );
    assert_eq!(
        res.unwrap_err().root_cause().to_string(),
        ContractError::MessageNotFound {
            message_id: "missing".to_string()
        }
        .to_string()
    );
}

#[test]
fn test_claim_all_skips_individually_claimed_and_keeps_fifo() {
    let (mut app, contract_addr, _, relayer) = setup();

    for id in ["m1", "m2", "m3"] {
        receive(&mut app, &relayer, &contract_addr, id, "0xbb", id.as_bytes()).unwrap();
    }

    app.execute_contract(
        relayer.clone(),
        contract_addr.clone(),
        &ExecuteMsg::ClaimMessage {
            message_id: "m2".to_string(),
        },
        &[],
    )
    .unwrap();

    assert_eq!(
        pending(&app, &contract_addr, "0xbb"),
        vec!["m1".to_string(), "m3".to_string()]
    );

    let res = app
        .execute_contract(
            relayer.clone(),
            contract_addr.clone(),
            &ExecuteMsg::ClaimAllMessages {
                target_contract: "0xBB".to_string(),
            },
            &[],
        )
        .unwrap();
    let claimed: ClaimAllMessagesResponse = from_json(res.data.unwrap()).unwrap();
    let ids: Vec<_> = claimed.messages.iter().map(|m| m.message_id.as_str()).collect();
    assert_eq!(ids, vec!["m1", "m3"]);

    assert!(pending(&app, &contract_addr, "0xbb").is_empty());

    let stats: StatsResponse = app
        .wrap()
        .query_wasm_smart(&contract_addr, &QueryMsg::Stats {})
        .unwrap();
    assert_eq!(stats.total_received, 3);
    assert_eq!(stats.total_claimed, 3);
}

#[test]
fn test_claim_all_unknown_recipient_returns_empty() {
    let (mut app, contract_addr, _, _) = setup();

    let res = app
        .execute_contract(
            Addr::unchecked("terra1anyone"),
            contract_addr.clone(),
            &ExecuteMsg::ClaimAllMessages {
                target_contract: "0xnobody".to_string(),
            },
            &[],
        )
        .unwrap();
    let claimed: ClaimAllMessagesResponse = from_json(res.data.unwrap()).unwrap();
    assert!(claimed.messages.is_empty());
}

#[test]
fn test_queue_refills_after_drain() {
    let (mut app, contract_addr, _, relayer) = setup();

    receive(&mut app, &relayer, &contract_addr, "m1", "0xbb", b"1").unwrap();
    app.execute_contract(
        relayer.clone(),
        contract_addr.clone(),
        &ExecuteMsg::ClaimAllMessages {
            target_contract: "0xbb".to_string(),
        },
        &[],
    )
    .unwrap();

    receive(&mut app, &relayer, &contract_addr, "m2", "0xbb", b"2").unwrap();
    assert_eq!(pending(&app, &contract_addr, "0xbb"), vec!["m2".to_string()]);

    let res = app
        .execute_contract(
            relayer.clone(),
            contract_addr.clone(),
            &ExecuteMsg::ClaimAllMessages {
                target_contract: "0xbb".to_string(),
            },
            &[],
        )
        .unwrap();
    let claimed: ClaimAllMessagesResponse = from_json(res.data.unwrap()).unwrap();
    assert_eq!(claimed.messages.len(), 1);
    assert_eq!(claimed.messages[0].message_id, "m2");
}

#[test]
fn test_retry_dispatch_rejected_in_pull_mode() {
    let (mut app, contract_addr, owner, _) = setup();

    let res = app.execute_contract(
        owner,
        contract_addr.clone(),
        &ExecuteMsg::RetryDispatch {
            message_id: "m1".to_string(),
        },
        &[],
    );
    assert_eq!(
        res.unwrap_err().root_cause().to_string(),
        ContractError::DeliveryModeMismatch {
            expected: DeliveryMode::Push
        }
        .to_string()
    );
}
