//! End-to-end signing: mnemonic to broadcast-ready bytes.

use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use und_signer::crypto::keys::generate_mnemonic;
use und_signer::crypto::keystore;
use und_signer::node::{AccountInfo, BroadcastResult, FeeModule, ModuleFeeParams};
use und_signer::tx::{build_sign_doc, compile_auth_info, sign_transaction, Signature};
use und_signer::{
    Account, BroadcastMode, Broadcaster, Coin, Fee, Msg, NodeQuery, Session, SignedTransaction,
    SignerResult, TxBody, TxContext,
};

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("und_signer=debug"))
            .with_test_writer()
            .try_init();
    });
}

struct FixedNode {
    account: AccountInfo,
    broadcasts: Mutex<Vec<Vec<u8>>>,
}

impl FixedNode {
    fn new(account_number: u64, sequence: u64) -> Self {
        Self {
            account: AccountInfo {
                account_number,
                sequence,
            },
            broadcasts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl NodeQuery for FixedNode {
    async fn get_account(&self, _address: &str) -> SignerResult<Option<AccountInfo>> {
        Ok(Some(self.account))
    }

    async fn get_chain_id(&self) -> SignerResult<String> {
        Ok("TEST-1".to_string())
    }

    async fn get_module_fee_params(&self, _module: FeeModule) -> SignerResult<ModuleFeeParams> {
        Ok(ModuleFeeParams {
            fee_register: 1_000_000_000_000,
            fee_record: 1_000_000_000,
            denom: "nund".to_string(),
        })
    }
}

#[async_trait]
impl Broadcaster for FixedNode {
    async fn broadcast(
        &self,
        tx: &SignedTransaction,
        _mode: BroadcastMode,
    ) -> SignerResult<BroadcastResult> {
        self.broadcasts.lock().unwrap().push(tx.to_bytes());
        Ok(BroadcastResult {
            txhash: tx.hash(),
            code: 0,
            raw_log: String::new(),
            height: 0,
        })
    }
}

fn fee() -> Fee {
    Fee::new(Coin::nund(25_000_000), 200_000)
}

fn context() -> TxContext {
    TxContext {
        chain_id: "TEST-1".to_string(),
        account_number: 5,
        sequence: 3,
    }
}

fn send(from: &Account, to: &Account) -> Msg {
    Msg::Send {
        from_address: from.address.clone(),
        to_address: to.address.clone(),
        amount: Coin::nund(100_000_000),
    }
}

#[test]
fn mnemonic_to_signed_send() {
    init_tracing();
    let mnemonic = generate_mnemonic().unwrap();
    assert_eq!(mnemonic.split_whitespace().count(), 24);

    let sender = Account::from_mnemonic(&mnemonic, 0).unwrap();
    let recipient = Account::from_mnemonic(&mnemonic, 1).unwrap();
    let body = TxBody::new(&[send(&sender, &recipient)], "").unwrap();

    let tx = sign_transaction(&body, &fee(), &context(), &sender.private_key).unwrap();
    let again = sign_transaction(&body, &fee(), &context(), &sender.private_key).unwrap();
    assert_eq!(tx.to_bytes(), again.to_bytes());

    // The node checks the signature against its own rebuild of the sign doc.
    let auth_info = compile_auth_info(3, &fee(), &sender.public_key).unwrap();
    let doc = build_sign_doc(&body, &auth_info, "TEST-1", 5).unwrap();
    let signature = Signature::from_slice(&tx.signatures()[0]).unwrap();
    assert!(signature.verify(&doc, &sender.public_key));

    let decoded = cosmrs::Tx::from_bytes(&tx.to_bytes()).unwrap();
    assert_eq!(decoded.body.messages.len(), 1);
    assert_eq!(
        decoded.body.messages[0].type_url,
        "/cosmos.bank.v1beta1.MsgSend"
    );
    assert_eq!(decoded.auth_info.signer_infos[0].sequence, 3);
    assert_eq!(decoded.auth_info.fee.gas_limit, 200_000);
    assert_eq!(decoded.auth_info.fee.amount[0].amount, 25_000_000);
    assert_eq!(decoded.auth_info.fee.amount[0].denom.as_ref(), "nund");
    assert_eq!(decoded.signatures.len(), 1);
}

const FIXED_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon \
    abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon \
    abandon abandon abandon abandon art";

#[test]
fn fixed_mnemonic_send_matches_known_bytes() {
    init_tracing();
    let sender = Account::from_mnemonic(FIXED_MNEMONIC, 0).unwrap();
    let recipient = Account::from_mnemonic(FIXED_MNEMONIC, 1).unwrap();
    assert_eq!(sender.address, "und1c29dtnlluf8rk7jzhgxnxlg9lsdaect0jjgs5l");
    assert_eq!(recipient.address, "und1w30egfnm00267f23k4yrpc65645kqhx68eu5zp");
    assert_eq!(
        sender.public_key.to_hex(),
        "034344d5cf7ec2bdc03e49f382068825f41c636267744eaeb8828dcebde5b42570"
    );

    let body = TxBody::new(&[send(&sender, &recipient)], "").unwrap();
    let tx = sign_transaction(&body, &fee(), &context(), &sender.private_key).unwrap();

    assert_eq!(
        hex::encode(&tx.signatures()[0]),
        "24f88033ab663e850903abebef6439b1933acadc646d9ca8ccfafb9e081a60262c60174a4f50d01dd3254c2e3929d35db6242ac951f7fa2dcf707d0d94288e20"
    );
    assert_eq!(
        tx.to_base64(),
        "Co4BCosBChwvY29zbW9zLmJhbmsudjFiZXRhMS5Nc2dTZW5kEmsKKnVuZDFjMjlkdG5sbHVmOHJrN2p6aGd4bnhsZzlsc2RhZWN0MGpqZ3M1bBIqdW5kMXczMGVnZm5tMDAyNjdmMjNrNHlycGM2NTY0NWtxaHg2OGV1NXpwGhEKBG51bmQSCTEwMDAwMDAwMBJqClAKRgofL2Nvc21vcy5jcnlwdG8uc2VjcDI1NmsxLlB1YktleRIjCiEDQ0TVz37CvcA+SfOCBogl9BxjYmd0Tq64go3OveW0JXASBAoCCAEYAxIWChAKBG51bmQSCDI1MDAwMDAwEMCaDBpAJPiAM6tmPoUJA6vr72Q5sZM6ytxkbZyozPr7nggaYCYsYBdKT1DQHdMlTC45KdNdtiQqyVH3+i3PcH0NlCiOIA=="
    );
    assert_eq!(
        tx.hash(),
        "2D3B0D207C51712A0B894E9D6A5EA7E84B6801CF695379783E7EF38E6D9FC5B6"
    );
}

#[test]
fn keystore_recovered_key_signs_identically() {
    init_tracing();
    let account = Account::generate().unwrap();
    let recipient = Account::generate().unwrap();
    let store = keystore::encrypt(&account.private_key, "correct horse").unwrap();
    let json = store.to_json().unwrap();

    let restored = Account::from_keystore(
        &und_signer::Keystore::from_json(&json).unwrap(),
        "correct horse",
    )
    .unwrap();
    assert_eq!(restored.address, account.address);

    let body = TxBody::new(&[send(&account, &recipient)], "restored").unwrap();
    let expected = sign_transaction(&body, &fee(), &context(), &account.private_key).unwrap();
    let recovered = sign_transaction(&body, &fee(), &context(), &restored.private_key).unwrap();
    assert_eq!(expected.to_bytes(), recovered.to_bytes());
}

#[tokio::test]
async fn session_signs_and_broadcasts() {
    init_tracing();
    let node = Arc::new(FixedNode::new(5, 3));
    let mnemonic = generate_mnemonic().unwrap();
    let recipient = Account::generate().unwrap();

    let mut session = Session::new(node.clone());
    session.init_chain().await.unwrap();
    let address = session.set_mnemonic(&mnemonic, 0).await.unwrap().to_string();
    assert_eq!(address, Account::from_mnemonic(&mnemonic, 0).unwrap().address);

    let tx = session
        .send(&recipient.address, Coin::nund(100_000_000), &fee(), "")
        .await
        .unwrap();

    // Matches signing the same body directly with the same context.
    let sender = Account::from_mnemonic(&mnemonic, 0).unwrap();
    let body = TxBody::new(&[send(&sender, &recipient)], "").unwrap();
    let direct = sign_transaction(&body, &fee(), &context(), &sender.private_key).unwrap();
    assert_eq!(tx.to_bytes(), direct.to_bytes());

    let result = node.broadcast(&tx, BroadcastMode::Sync).await.unwrap();
    assert!(result.is_success());
    assert_eq!(result.txhash, tx.hash());
    assert_eq!(node.broadcasts.lock().unwrap().len(), 1);
}
