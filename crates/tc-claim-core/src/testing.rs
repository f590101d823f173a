//! In-memory provider, contract and view used by the controller tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use tc_api_types::{ChainId, ContractConfig, NetworkConfig, TxHash, WalletAddress};
use tc_contract_client::{ClaimContract, ContractError, ContractFactory, PendingTx, TxReceipt};
use tc_provider::{EventHandler, ProviderError, ProviderEvent, WalletProvider, methods};

use crate::config::ClaimConfig;
use crate::controller::ClaimController;
use crate::view::{ClaimView, ControlState, StatusKind};

pub const ACCOUNT: &str = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F";
pub const OTHER_ACCOUNT: &str = "0x8ba1f109551bD432803012645Ac136ddd64DBA72";
pub const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

pub fn account() -> WalletAddress {
    WalletAddress(ACCOUNT.to_owned())
}

pub fn other_account() -> WalletAddress {
    WalletAddress(OTHER_ACCOUNT.to_owned())
}

// ── Provider ──

pub struct ProviderState {
    available: bool,
    request_result: RefCell<Result<Vec<WalletAddress>, ProviderError>>,
    authorized: RefCell<Vec<WalletAddress>>,
    chain: RefCell<ChainId>,
    switch_error: RefCell<Option<ProviderError>>,
    add_error: RefCell<Option<ProviderError>>,
    calls: RefCell<Vec<&'static str>>,
    handlers: RefCell<Vec<EventHandler>>,
}

#[derive(Clone)]
pub struct FakeProvider(Rc<ProviderState>);

impl FakeProvider {
    fn with_availability(available: bool, chain: &str) -> Self {
        Self(Rc::new(ProviderState {
            available,
            request_result: RefCell::new(Ok(vec![account()])),
            authorized: RefCell::new(Vec::new()),
            chain: RefCell::new(ChainId(chain.to_owned())),
            switch_error: RefCell::new(None),
            add_error: RefCell::new(None),
            calls: RefCell::new(Vec::new()),
            handlers: RefCell::new(Vec::new()),
        }))
    }

    pub fn on_chain(chain: &str) -> Self {
        Self::with_availability(true, chain)
    }

    pub fn missing() -> Self {
        Self::with_availability(false, "0x38")
    }

    pub fn authorize(&self, account: WalletAddress) {
        self.0.authorized.borrow_mut().push(account);
    }

    pub fn reject_accounts(&self) {
        *self.0.request_result.borrow_mut() = Err(ProviderError::user_rejected());
    }

    pub fn fail_switch(&self, code: i64, message: &str) {
        *self.0.switch_error.borrow_mut() = Some(ProviderError::new(Some(code), message));
    }

    pub fn fail_add(&self, code: i64, message: &str) {
        *self.0.add_error.borrow_mut() = Some(ProviderError::new(Some(code), message));
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.0.calls.borrow().clone()
    }

    pub fn handler_count(&self) -> usize {
        self.0.handlers.borrow().len()
    }

    pub fn emit(&self, event: ProviderEvent) {
        if let ProviderEvent::ChainChanged(chain) = &event {
            *self.0.chain.borrow_mut() = chain.clone();
        }
        for handler in self.0.handlers.borrow().iter() {
            handler(&event);
        }
    }

    fn record(&self, method: &'static str) {
        self.0.calls.borrow_mut().push(method);
    }
}

#[async_trait(?Send)]
impl WalletProvider for FakeProvider {
    fn is_available(&self) -> bool {
        self.0.available
    }

    async fn request_accounts(&self) -> Result<Vec<WalletAddress>, ProviderError> {
        self.record(methods::ETH_REQUEST_ACCOUNTS);
        self.0.request_result.borrow().clone()
    }

    async fn accounts(&self) -> Result<Vec<WalletAddress>, ProviderError> {
        self.record(methods::ETH_ACCOUNTS);
        Ok(self.0.authorized.borrow().clone())
    }

    async fn chain_id(&self) -> Result<ChainId, ProviderError> {
        self.record(methods::ETH_CHAIN_ID);
        Ok(self.0.chain.borrow().clone())
    }

    async fn switch_chain(&self, chain_id: &ChainId) -> Result<(), ProviderError> {
        self.record(methods::WALLET_SWITCH_ETHEREUM_CHAIN);
        if let Some(err) = self.0.switch_error.borrow().clone() {
            return Err(err);
        }
        *self.0.chain.borrow_mut() = chain_id.clone();
        Ok(())
    }

    async fn add_chain(&self, network: &NetworkConfig) -> Result<(), ProviderError> {
        self.record(methods::WALLET_ADD_ETHEREUM_CHAIN);
        if let Some(err) = self.0.add_error.borrow().clone() {
            return Err(err);
        }
        *self.0.chain.borrow_mut() = network.chain_id.clone();
        Ok(())
    }

    fn subscribe(&self, handler: EventHandler) -> Result<(), ProviderError> {
        self.0.handlers.borrow_mut().push(handler);
        Ok(())
    }
}

// ── Contract ──

#[derive(Default)]
pub struct ContractState {
    fail_build: Cell<bool>,
    builds: RefCell<Vec<WalletAddress>>,
    claim_error: RefCell<Option<ContractError>>,
    revert_on_wait: Cell<bool>,
    has_claimed: Cell<bool>,
    claims: Cell<u32>,
}

#[derive(Clone, Default)]
pub struct FakeFactory(Rc<ContractState>);

impl FakeFactory {
    pub fn fail_build(&self) {
        self.0.fail_build.set(true);
    }

    pub fn fail_claim(&self, err: ContractError) {
        *self.0.claim_error.borrow_mut() = Some(err);
    }

    pub fn fail_wait(&self) {
        self.0.revert_on_wait.set(true);
    }

    pub fn mark_claimed(&self) {
        self.0.has_claimed.set(true);
    }

    pub fn builds(&self) -> Vec<WalletAddress> {
        self.0.builds.borrow().clone()
    }

    pub fn claims(&self) -> u32 {
        self.0.claims.get()
    }
}

impl ContractFactory for FakeFactory {
    type Handle = FakeContract;

    fn build(
        &self,
        config: &ContractConfig,
        signer: &WalletAddress,
    ) -> Result<FakeContract, ContractError> {
        if self.0.fail_build.get() {
            return Err(ContractError::InvalidAddress(config.address.clone()));
        }
        self.0.builds.borrow_mut().push(signer.clone());
        Ok(FakeContract {
            signer: signer.clone(),
            state: Rc::clone(&self.0),
        })
    }
}

pub struct FakeContract {
    signer: WalletAddress,
    state: Rc<ContractState>,
}

#[async_trait(?Send)]
impl ClaimContract for FakeContract {
    type Pending = FakePending;

    fn signer(&self) -> &WalletAddress {
        &self.signer
    }

    async fn claim(&self) -> Result<FakePending, ContractError> {
        let n = self.state.claims.get() + 1;
        self.state.claims.set(n);
        if let Some(err) = self.state.claim_error.borrow().clone() {
            return Err(err);
        }

        let hash = TxHash(format!("0x{n:064x}"));
        let result = if self.state.revert_on_wait.get() {
            Err(ContractError::Reverted(hash.clone()))
        } else {
            Ok(TxReceipt {
                transaction_hash: hash.clone(),
                block_number: Some("0x1".to_owned()),
                status: Some("0x1".to_owned()),
            })
        };
        Ok(FakePending { hash, result })
    }

    async fn has_claimed(&self, _account: &WalletAddress) -> Result<bool, ContractError> {
        Ok(self.state.has_claimed.get())
    }
}

pub struct FakePending {
    hash: TxHash,
    result: Result<TxReceipt, ContractError>,
}

#[async_trait(?Send)]
impl PendingTx for FakePending {
    fn hash(&self) -> &TxHash {
        &self.hash
    }

    async fn wait(&self) -> Result<TxReceipt, ContractError> {
        // Give other futures on the same task a chance to run, like a real
        // confirmation wait would.
        tokio::task::yield_now().await;
        self.result.clone()
    }
}

// ── View ──

#[derive(Default)]
pub struct ViewState {
    statuses: RefCell<Vec<(String, StatusKind)>>,
    connect: RefCell<Option<ControlState>>,
    claim: RefCell<Option<ControlState>>,
    wallet_info: RefCell<Option<WalletAddress>>,
    balance: RefCell<String>,
}

#[derive(Clone, Default)]
pub struct RecordingView(Rc<ViewState>);

impl RecordingView {
    pub fn statuses(&self) -> Vec<(String, StatusKind)> {
        self.0.statuses.borrow().clone()
    }

    pub fn last_status(&self) -> Option<(String, StatusKind)> {
        self.0.statuses.borrow().last().cloned()
    }

    pub fn connect(&self) -> Option<ControlState> {
        self.0.connect.borrow().clone()
    }

    pub fn claim(&self) -> Option<ControlState> {
        self.0.claim.borrow().clone()
    }

    pub fn wallet_info(&self) -> Option<WalletAddress> {
        self.0.wallet_info.borrow().clone()
    }

    pub fn balance(&self) -> String {
        self.0.balance.borrow().clone()
    }
}

impl ClaimView for RecordingView {
    fn show_status(&self, message: &str, kind: StatusKind) {
        self.0.statuses.borrow_mut().push((message.to_owned(), kind));
    }

    fn set_connect_control(&self, state: &ControlState) {
        *self.0.connect.borrow_mut() = Some(state.clone());
    }

    fn set_claim_control(&self, state: &ControlState) {
        *self.0.claim.borrow_mut() = Some(state.clone());
    }

    fn show_wallet_info(&self, account: Option<&WalletAddress>) {
        *self.0.wallet_info.borrow_mut() = account.cloned();
    }

    fn show_balance(&self, text: &str) {
        *self.0.balance.borrow_mut() = text.to_owned();
    }
}

// ── Harness ──

pub struct Harness {
    pub controller: ClaimController<FakeProvider, FakeFactory, RecordingView>,
    pub provider: FakeProvider,
    pub contracts: FakeFactory,
    pub view: RecordingView,
}

impl Harness {
    pub fn new(provider: FakeProvider) -> Self {
        let config = ClaimConfig {
            contract: ContractConfig::with_claim_abi(CONTRACT),
            ..ClaimConfig::default()
        };
        let contracts = FakeFactory::default();
        let view = RecordingView::default();
        let controller =
            ClaimController::new(config, provider.clone(), contracts.clone(), view.clone());
        Self {
            controller,
            provider,
            contracts,
            view,
        }
    }
}
