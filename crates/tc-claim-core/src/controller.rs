use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tc_api_types::{ChainId, TxHash, WalletAddress};
use tc_contract_client::{ClaimContract, ContractFactory, PendingTx};
use tc_provider::{EventHandler, ProviderError, ProviderEvent, WalletProvider};
use tracing::{debug, error, info, warn};

use crate::config::ClaimConfig;
use crate::error::ClaimError;
use crate::format::format_balance;
use crate::session::{Session, Status};
use crate::view::{ClaimView, StatusKind};

/// Owns the session and sequences every wallet and contract interaction.
///
/// Cloning is cheap and yields another handle on the same session. All
/// access happens on one thread; `RefCell` borrows are never held across
/// an `.await`.
pub struct ClaimController<P, F, V>
where
    F: ContractFactory,
{
    inner: Rc<Inner<P, F, V>>,
}

struct Inner<P, F, V>
where
    F: ContractFactory,
{
    config: ClaimConfig,
    provider: P,
    factory: F,
    view: V,
    session: RefCell<Session>,
    contract: RefCell<Option<Rc<F::Handle>>>,
}

impl<P, F, V> Clone for ClaimController<P, F, V>
where
    F: ContractFactory,
{
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<P, F, V> ClaimController<P, F, V>
where
    P: WalletProvider + 'static,
    F: ContractFactory + 'static,
    V: ClaimView + 'static,
{
    pub fn new(config: ClaimConfig, provider: P, factory: F, view: V) -> Self {
        let session = Session::new(config.initial_balance);
        Self {
            inner: Rc::new(Inner {
                config,
                provider,
                factory,
                view,
                session: RefCell::new(session),
                contract: RefCell::new(None),
            }),
        }
    }

    pub fn config(&self) -> &ClaimConfig {
        &self.inner.config
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.inner.session.borrow().clone()
    }

    pub fn has_contract(&self) -> bool {
        self.inner.contract.borrow().is_some()
    }

    pub fn report_status(&self, message: &str, kind: StatusKind) {
        self.inner.session.borrow_mut().status = Some(Status {
            message: message.to_owned(),
            kind,
        });
        self.inner.view.show_status(message, kind);
    }

    /// Pushes controls, wallet info and balance to the view.
    pub fn render(&self) {
        let (connect, claim, account, balance) = {
            let session = self.inner.session.borrow();
            (
                session.connect_control(),
                session.claim_control(),
                session.account.clone(),
                session.balance,
            )
        };
        let view = &self.inner.view;
        view.set_connect_control(&connect);
        view.set_claim_control(&claim);
        view.show_wallet_info(account.as_ref());
        view.show_balance(&format_balance(balance, &self.inner.config.token_symbol));
    }

    /// Page-load check: adopt an account the wallet has already authorized
    /// for this origin, without prompting. Failures only reach the log.
    pub async fn restore_session(&self) {
        self.render();

        let provider = &self.inner.provider;
        if !provider.is_available() {
            debug!("no wallet provider injected");
            return;
        }

        let accounts = match provider.accounts().await {
            Ok(accounts) => accounts,
            Err(err) => {
                warn!(%err, "error checking wallet connection");
                return;
            }
        };
        let Some(account) = accounts.into_iter().next() else {
            return;
        };

        let on_chain = match provider.chain_id().await {
            Ok(chain_id) => chain_id.matches(&self.inner.config.network.chain_id),
            Err(err) => {
                warn!(%err, "could not read active chain");
                false
            }
        };

        if !on_chain {
            {
                let mut session = self.inner.session.borrow_mut();
                session.account = Some(account.clone());
                session.on_expected_chain = false;
            }
            info!(account = %account, "restored wallet connection on another network");
            self.render();
            self.subscribe_once();
            self.fail(ClaimError::WrongNetwork {
                network: self.inner.config.network.network_name.clone(),
            });
            return;
        }

        let Ok(contract) = self.build_contract(&account) else {
            return;
        };
        let claimed = contract.has_claimed(&account).await.unwrap_or_else(|err| {
            warn!(%err, "hasClaimed lookup failed");
            false
        });

        {
            let mut session = self.inner.session.borrow_mut();
            session.account = Some(account.clone());
            session.on_expected_chain = true;
            session.claimed = claimed;
        }
        *self.inner.contract.borrow_mut() = Some(contract);

        info!(account = %account, claimed, "restored wallet connection");
        self.render();
        self.subscribe_once();
    }

    pub async fn connect(&self) -> Result<(), ClaimError> {
        match self.try_connect().await {
            Ok(account) => {
                info!(account = %account, "wallet connected");
                self.report_status("Wallet connected successfully!", StatusKind::Success);
                self.subscribe_once();
                Ok(())
            }
            Err(err) => {
                warn!(%err, "connect failed");
                Err(self.fail(err))
            }
        }
    }

    async fn try_connect(&self) -> Result<WalletAddress, ClaimError> {
        let provider = &self.inner.provider;
        if !provider.is_available() {
            return Err(ClaimError::ProviderMissing);
        }

        let accounts = provider
            .request_accounts()
            .await
            .map_err(ClaimError::connect)?;
        let Some(account) = accounts.into_iter().next() else {
            return Err(ClaimError::Connect(ProviderError::new(
                None,
                "no accounts returned",
            )));
        };

        let chain_id = provider.chain_id().await.map_err(ClaimError::connect)?;
        let network = &self.inner.config.network;
        if !chain_id.matches(&network.chain_id) {
            self.report_status(
                &format!("Switching to {}...", network.network_name),
                StatusKind::Processing,
            );
            self.switch_network().await?;
        }

        let contract = self.build_contract(&account)?;
        *self.inner.contract.borrow_mut() = Some(contract);
        {
            let mut session = self.inner.session.borrow_mut();
            session.account = Some(account.clone());
            session.on_expected_chain = true;
        }
        self.render();
        Ok(account)
    }

    async fn switch_network(&self) -> Result<(), ClaimError> {
        let network = &self.inner.config.network;
        let provider = &self.inner.provider;
        match provider.switch_chain(&network.chain_id).await {
            Ok(()) => Ok(()),
            Err(err) if err.is_unrecognized_chain() => {
                info!(chain_id = %network.chain_id, "chain unknown to wallet, registering it");
                provider
                    .add_chain(network)
                    .await
                    .map_err(|source| ClaimError::ChainRegistration {
                        network: network.network_name.clone(),
                        source,
                    })
            }
            Err(source) => Err(ClaimError::ChainSwitch {
                network: network.network_name.clone(),
                source,
            }),
        }
    }

    fn build_contract(&self, account: &WalletAddress) -> Result<Rc<F::Handle>, ClaimError> {
        self.inner
            .factory
            .build(&self.inner.config.contract, account)
            .map(Rc::new)
            .map_err(|err| {
                error!(%err, "contract initialization error");
                ClaimError::ContractInit(err)
            })
    }

    fn subscribe_once(&self) {
        if self.inner.session.borrow().subscribed {
            return;
        }

        let weak: Weak<Inner<P, F, V>> = Rc::downgrade(&self.inner);
        let handler: EventHandler = Box::new(move |event| {
            if let Some(inner) = weak.upgrade() {
                ClaimController { inner }.handle_event(event);
            }
        });

        match self.inner.provider.subscribe(handler) {
            Ok(()) => self.inner.session.borrow_mut().subscribed = true,
            Err(err) => warn!(%err, "could not subscribe to wallet events"),
        }
    }

    pub fn handle_event(&self, event: &ProviderEvent) {
        match event {
            ProviderEvent::AccountsChanged(accounts) => self.on_accounts_changed(accounts),
            ProviderEvent::ChainChanged(chain_id) => self.on_chain_changed(chain_id),
        }
    }

    pub fn on_accounts_changed(&self, accounts: &[WalletAddress]) {
        let Some(account) = accounts.first().cloned() else {
            self.disconnect();
            return;
        };

        // Authorization alone is not a connection; the chain check and
        // contract build still have to run through connect().
        if !self.inner.session.borrow().is_connected() {
            info!(account = %account, "account authorized while disconnected");
            self.render();
            return;
        }

        info!(account = %account, "account changed");
        self.inner.session.borrow_mut().account = Some(account.clone());

        let bound = self.inner.contract.borrow().is_some();
        if bound {
            match self.build_contract(&account) {
                Ok(contract) => *self.inner.contract.borrow_mut() = Some(contract),
                Err(err) => {
                    *self.inner.contract.borrow_mut() = None;
                    self.render();
                    self.fail(err);
                    return;
                }
            }
        }

        self.render();
        self.report_status("Account changed successfully!", StatusKind::Success);
    }

    /// The handle is dropped when the wallet leaves the expected network and
    /// rebuilt for the current account when it comes back.
    pub fn on_chain_changed(&self, chain_id: &ChainId) {
        let network = &self.inner.config.network;
        let matches = chain_id.matches(&network.chain_id);
        info!(chain_id = %chain_id, matches, "chain changed");

        let account = {
            let mut session = self.inner.session.borrow_mut();
            session.on_expected_chain = matches;
            session.account.clone()
        };

        if !matches {
            *self.inner.contract.borrow_mut() = None;
            self.render();
            self.fail(ClaimError::WrongNetwork {
                network: network.network_name.clone(),
            });
            return;
        }

        if let Some(account) = account {
            match self.build_contract(&account) {
                Ok(contract) => *self.inner.contract.borrow_mut() = Some(contract),
                Err(err) => {
                    *self.inner.contract.borrow_mut() = None;
                    self.render();
                    self.fail(err);
                    return;
                }
            }
        }
        self.render();
    }

    fn disconnect(&self) {
        self.inner.session.borrow_mut().reset();
        *self.inner.contract.borrow_mut() = None;
        info!("wallet disconnected");
        self.render();
        self.report_status("Wallet disconnected", StatusKind::Error);
    }

    pub async fn claim(&self) -> Result<TxHash, ClaimError> {
        let (contract, epoch) = match self.begin_claim() {
            Ok(started) => started,
            Err(err) => return Err(self.fail(err)),
        };

        let outcome = self.submit_claim(contract.as_ref()).await;

        let current_epoch = {
            let mut session = self.inner.session.borrow_mut();
            session.claim_in_flight = false;
            session.epoch
        };
        if current_epoch != epoch {
            warn!("claim finished after the wallet disconnected; result discarded");
            self.render();
            return outcome;
        }

        match outcome {
            Ok(hash) => {
                {
                    let mut session = self.inner.session.borrow_mut();
                    session.claimed = true;
                    session.balance = session
                        .balance
                        .saturating_sub(self.inner.config.claim_amount);
                }
                info!(tx = %hash, "claim confirmed");
                self.render();
                self.report_status(
                    &format!("Successfully claimed tokens! TX: {hash}"),
                    StatusKind::Success,
                );
                Ok(hash)
            }
            Err(err) => {
                warn!(%err, "claim failed");
                self.render();
                Err(self.fail(err))
            }
        }
    }

    /// Checks preconditions and flips the session into the in-flight state.
    fn begin_claim(&self) -> Result<(Rc<F::Handle>, u64), ClaimError> {
        let (account, epoch) = {
            let session = self.inner.session.borrow();
            let Some(account) = session.account.clone() else {
                return Err(ClaimError::NotConnected);
            };
            if session.claimed {
                return Err(ClaimError::AlreadyClaimed);
            }
            if session.claim_in_flight {
                return Err(ClaimError::ClaimInFlight);
            }
            if !session.on_expected_chain {
                return Err(ClaimError::WrongNetwork {
                    network: self.inner.config.network.network_name.clone(),
                });
            }
            (account, session.epoch)
        };

        let existing = self.inner.contract.borrow().clone();
        let contract = match existing {
            Some(contract) => contract,
            None => {
                let contract = self.build_contract(&account)?;
                *self.inner.contract.borrow_mut() = Some(Rc::clone(&contract));
                contract
            }
        };

        self.inner.session.borrow_mut().claim_in_flight = true;
        self.render();
        self.report_status("Processing claim...", StatusKind::Processing);
        Ok((contract, epoch))
    }

    async fn submit_claim(&self, contract: &F::Handle) -> Result<TxHash, ClaimError> {
        let pending = contract.claim().await.map_err(ClaimError::ContractCall)?;
        let hash = pending.hash().clone();
        info!(tx = %hash, signer = %contract.signer(), "claim submitted");

        self.report_status(
            "Waiting for transaction confirmation...",
            StatusKind::Processing,
        );
        pending.wait().await.map_err(ClaimError::Confirmation)?;
        Ok(hash)
    }

    fn fail(&self, err: ClaimError) -> ClaimError {
        if err.is_silent() {
            debug!(%err, "ignored request on locked control");
        } else {
            self.report_status(&err.to_string(), StatusKind::Error);
        }
        err
    }
}
