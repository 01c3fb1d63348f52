mod common;

use common::{ABANDON_ABOUT, ADDRESS, StubChain};
use eth_wallet_bot::blockchain::models::{EtherAmount, QueryError, TransactionSummary};
use eth_wallet_bot::bot::{
    ChatState, ConversationStateMachine, InMemorySessionStore, MenuCommand, UserId,
};
use ethers_core::types::U256;
use std::sync::Arc;

fn machine_with(chain: StubChain) -> (ConversationStateMachine, Arc<StubChain>) {
    let chain = Arc::new(chain);
    let machine = ConversationStateMachine::new(
        Arc::new(InMemorySessionStore::new()),
        chain.clone(),
    );
    (machine, chain)
}

fn one_and_a_half_ether() -> EtherAmount {
    EtherAmount::from_wei(U256::from_dec_str("1500000000000000000").unwrap())
}

fn sample_tx() -> TransactionSummary {
    TransactionSummary {
        hash: "0xabcdef0123...".to_string(),
        from_address: "0x11111111...".to_string(),
        to_address: "0x22222222...".to_string(),
        value_ether: one_and_a_half_ether(),
    }
}

#[tokio::test]
async fn new_user_starts_idle_and_unknown_text_gets_the_menu() {
    let (machine, chain) = machine_with(StubChain::new(Ok(EtherAmount::zero()), vec![]));
    let user = UserId::from(1_i64);
    assert_eq!(machine.session(&user).state, ChatState::Idle);

    let reply = machine.handle(&user, "hello").await;
    assert!(reply.show_menu);
    assert_eq!(reply.text, "Please use the menu buttons.");
    assert_eq!(machine.session(&user).state, ChatState::Idle);
    assert!(chain.calls().is_empty());
}

#[tokio::test]
async fn balance_flow_queries_then_returns_to_idle() {
    let (machine, chain) = machine_with(StubChain::new(Ok(one_and_a_half_ether()), vec![]));
    let user = UserId::from(2_i64);

    let prompt = machine.handle(&user, MenuCommand::CheckBalance.label()).await;
    assert!(prompt.text.contains("Ethereum address"));
    assert_eq!(machine.session(&user).state, ChatState::AwaitingAddressForBalance);

    let reply = machine.handle(&user, &format!("  {}  ", ADDRESS)).await;
    assert_eq!(reply.text, "💰 Balance: 1.500000 ETH");
    assert_eq!(machine.session(&user).state, ChatState::Idle);
    assert_eq!(chain.calls(), vec![format!("balance:{}", ADDRESS)]);
}

#[tokio::test]
async fn invalid_address_resets_without_querying() {
    let (machine, chain) = machine_with(StubChain::new(Ok(EtherAmount::zero()), vec![]));
    let user = UserId::from(3_i64);

    machine.handle(&user, "/transactions").await;
    let reply = machine.handle(&user, "0x123").await;
    assert!(reply.text.starts_with("❌ Invalid address"));
    assert_eq!(machine.session(&user).state, ChatState::Idle);
    assert!(chain.calls().is_empty());
}

#[tokio::test]
async fn upstream_error_becomes_a_reply_and_resets() {
    let (machine, _) = machine_with(StubChain::new(
        Err(QueryError::upstream("error sending request: operation timed out")),
        vec![],
    ));
    let user = UserId::from(4_i64);

    machine.handle(&user, "/balance").await;
    let reply = machine.handle(&user, ADDRESS).await;
    assert!(reply.text.starts_with("💰 Balance: error: "));
    assert!(reply.text.contains("timed out"));
    assert_eq!(machine.session(&user).state, ChatState::Idle);
}

#[tokio::test]
async fn empty_transaction_list_replies_and_resets() {
    let (machine, chain) = machine_with(StubChain::new(Ok(EtherAmount::zero()), vec![]));
    let user = UserId::from(5_i64);

    machine.handle(&user, MenuCommand::CheckTransactions.label()).await;
    assert_eq!(
        machine.session(&user).state,
        ChatState::AwaitingAddressForTransactions
    );

    let reply = machine.handle(&user, ADDRESS).await;
    assert!(reply.text.starts_with("📭 No transactions found"));
    assert_eq!(machine.session(&user).state, ChatState::Idle);
    assert_eq!(chain.calls(), vec![format!("txlist:{}", ADDRESS)]);
}

#[tokio::test]
async fn transaction_listing_is_markdown() {
    let (machine, _) = machine_with(StubChain::new(Ok(EtherAmount::zero()), vec![sample_tx()]));
    let user = UserId::from(6_i64);

    machine.handle(&user, "/transactions").await;
    let reply = machine.handle(&user, ADDRESS).await;
    assert!(reply.markdown);
    assert!(reply.text.contains("Hash: `0xabcdef0123...`"));
    assert!(reply.text.contains("Value: 1.500000 ETH"));
}

#[tokio::test]
async fn seed_flow_returns_address_and_key_once() {
    let (machine, chain) = machine_with(StubChain::new(Ok(EtherAmount::zero()), vec![]));
    let user = UserId::from(7_i64);

    let prompt = machine.handle(&user, MenuCommand::ConvertSeed.label()).await;
    assert!(prompt.text.contains("seed phrase"));

    let reply = machine.handle(&user, ABANDON_ABOUT).await;
    assert!(reply.markdown);
    assert!(reply.text.contains("`0x9858EfFD232B4033E47d90003D41EC34EcaEda94`"));
    assert!(reply.text.contains("1ab42cc412b618bdea3a599e3c9bae199ebf030895b039e9db1e30dafb12b727"));
    assert_eq!(machine.session(&user).state, ChatState::Idle);
    assert!(chain.calls().is_empty());
}

#[tokio::test]
async fn bad_seed_replies_with_reason_and_resets() {
    let (machine, _) = machine_with(StubChain::new(Ok(EtherAmount::zero()), vec![]));
    let user = UserId::from(8_i64);

    machine.handle(&user, "/seed").await;
    let reply = machine.handle(&user, "not a real seed phrase").await;
    assert!(reply.text.starts_with("❌ Error: "));
    assert!(!reply.markdown);
    assert_eq!(machine.session(&user).state, ChatState::Idle);
}

#[tokio::test]
async fn menu_label_in_awaiting_state_is_treated_as_payload() {
    let (machine, chain) = machine_with(StubChain::new(Ok(EtherAmount::zero()), vec![]));
    let user = UserId::from(9_i64);

    machine.handle(&user, "/balance").await;
    let reply = machine.handle(&user, MenuCommand::ConvertSeed.label()).await;
    assert!(reply.text.starts_with("❌ Invalid address"));
    assert_eq!(machine.session(&user).state, ChatState::Idle);
    assert!(chain.calls().is_empty());
}

#[tokio::test]
async fn start_resets_any_state_and_shows_menu() {
    let (machine, _) = machine_with(StubChain::new(Ok(EtherAmount::zero()), vec![]));
    let user = UserId::from(10_i64);

    machine.handle(&user, "/seed").await;
    assert_eq!(machine.session(&user).state, ChatState::AwaitingSeedPhrase);

    let reply = machine.dispatch(&user, "/start").await;
    assert!(reply.show_menu);
    assert!(reply.text.starts_with("👋"));
    assert_eq!(machine.session(&user).state, ChatState::Idle);
}

#[tokio::test]
async fn users_do_not_share_state() {
    let (machine, _) = machine_with(StubChain::new(Ok(EtherAmount::zero()), vec![]));
    let alice = UserId::from("alice");
    let bob = UserId::from("bob");

    machine.handle(&alice, "/seed").await;
    machine.handle(&bob, "/balance").await;
    assert_eq!(machine.session(&alice).state, ChatState::AwaitingSeedPhrase);
    assert_eq!(machine.session(&bob).state, ChatState::AwaitingAddressForBalance);

    machine.handle(&bob, ADDRESS).await;
    assert_eq!(machine.session(&alice).state, ChatState::AwaitingSeedPhrase);
    assert_eq!(machine.session(&bob).state, ChatState::Idle);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_users_complete_their_flows() {
    let (machine, _) = machine_with(StubChain::new(Ok(one_and_a_half_ether()), vec![]));
    let machine = Arc::new(machine);

    let tasks: Vec<_> = (0..32i64)
        .map(|i| {
            let machine = Arc::clone(&machine);
            tokio::spawn(async move {
                let user = UserId::from(i);
                machine.handle(&user, "/balance").await;
                machine.handle(&user, ADDRESS).await
            })
        })
        .collect();

    for task in tasks {
        let reply = task.await.unwrap();
        assert_eq!(reply.text, "💰 Balance: 1.500000 ETH");
    }
    for i in 0..32i64 {
        assert_eq!(machine.session(&UserId::from(i)).state, ChatState::Idle);
    }
}
