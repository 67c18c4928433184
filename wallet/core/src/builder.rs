//!
//! [`TransactionBuilder`]: payment and KRC20 transfer construction for one signing key.
//!
//! Building is split around an external signer. `build_*_for_sign` calls return the
//! unsigned transaction together with the signing preimages of its inputs, and
//! [`TransactionBuilder::build_for_send`] turns the returned signatures into a
//! broadcast-ready transaction.
//!

use crate::imports::*;
use crate::krc20::{CommitRevealBundle, IncompleteRevealParams, Krc20Envelope, TokenFeeParams};
use crate::tx::{
    BuiltTransaction, FeeType, InputContext, MassEstimator, PLACEHOLDER_SIGNATURE, PaymentOutput, SigningPreimage, TransactionDto,
    UnsignedTransaction, build_unsigned, build_unsigned_from_entries, placeholder_signature_script, resolve_change,
};
use crate::utxo::select;
use kasforge_txscript::{address_for_public_key, script_hash_address, standard_redeem_script};
use std::slice;

/// Builds transactions spending the outputs of a single public key.
///
/// The key's address is derived for the requested script class. Script hash
/// addresses commit to the ECDSA pay-to-pubkey script of the key.
#[derive(Clone)]
pub struct TransactionBuilder {
    public_key: Vec<u8>,
    class: ScriptClass,
    source: LockingScript,
    source_redeem_script: Option<Vec<u8>>,
    store: UtxoStore,
    settings: BuilderSettings,
    estimator: MassEstimator,
}

impl TransactionBuilder {
    pub fn new(public_key: &[u8], class: ScriptClass, store: UtxoStore, settings: BuilderSettings) -> Result<Self> {
        let address = address_for_public_key(public_key, class, settings.prefix())?;
        let source_redeem_script = match class {
            ScriptClass::ScriptHash => Some(standard_redeem_script(public_key)?),
            _ => None,
        };
        let estimator = MassEstimator::new(&settings.mass_params);
        debug!("transaction builder for {address} ({class})");
        Ok(Self {
            public_key: public_key.to_vec(),
            class,
            source: LockingScript::from_address(&address),
            source_redeem_script,
            store,
            settings,
            estimator,
        })
    }

    pub fn source_address(&self) -> Address {
        self.source.address(self.settings.prefix())
    }

    /// Locking script of the outputs this builder spends. Outputs reported for it
    /// go into the store with [`UtxoStore::update`].
    pub fn locking_script(&self) -> &LockingScript {
        &self.source
    }

    pub fn settings(&self) -> &BuilderSettings {
        &self.settings
    }

    pub fn store(&self) -> &UtxoStore {
        &self.store
    }

    /// Sum of the spendable outputs not consumed by an earlier build.
    pub fn available_amount(&self) -> u64 {
        self.store.available_amount(slice::from_ref(&self.source))
    }

    /// Builds a payment of `amount` sompi to `destination` and the signing
    /// preimages of its inputs, in input order.
    pub fn build_for_sign(&self, amount: u64, fee: FeeType, destination: &str) -> Result<(UnsignedTransaction, Vec<SigningPreimage>)> {
        let destination = self.parse_destination(destination)?;
        let unsigned = self.build_payment(PaymentOutput::new(destination, amount), fee)?;
        let preimages = unsigned.preimages()?;
        Ok((unsigned, preimages))
    }

    /// Fills in the signatures of `unsigned`, supplied in preimage order, and marks
    /// the spent outputs as consumed so later builds do not spend them again.
    pub fn build_for_send<S: AsRef<[u8]>>(&self, unsigned: &UnsignedTransaction, signatures: &[S]) -> Result<BuiltTransaction> {
        let built = unsigned.finalize(signatures)?;
        self.store.consume(built.outpoints());
        debug!("transaction {} ready to send, fees {}", built.id(), built.fees());
        Ok(built)
    }

    /// Builds a payment of at most the available balance with placeholder signatures,
    /// for measuring the mass of the signed transaction.
    ///
    /// When the fee does not fit next to the requested amount, the payment is reduced by the shortfall.
    pub fn build_for_mass_calculation(&self, amount: u64, fee_rate: u64, destination: &str) -> Result<TransactionDto> {
        let destination = self.parse_destination(destination)?;
        let amount = amount.min(self.available_amount());
        let fee = FeeType::Rate(fee_rate);
        let unsigned = match self.build_payment(PaymentOutput::new(destination.clone(), amount), fee) {
            Err(Error::InsufficientFunds { required, available }) if amount > required.saturating_sub(available) => {
                let amount = amount - required.saturating_sub(available);
                trace!("fee does not fit, measuring a payment of {amount}");
                self.build_payment(PaymentOutput::new(destination, amount), fee)?
            }
            result => result?,
        };
        Ok(unsigned.finalize_with_placeholder(&PLACEHOLDER_SIGNATURE)?.to_dto())
    }

    /// Builds the commit and reveal transactions transferring `token_amount` units of
    /// `ticker` to `destination`.
    ///
    /// The commit output holds the dust threshold plus the reveal fee, which the reveal
    /// transaction pays out of it, returning the rest to the source address.
    pub fn build_krc20_for_sign(&self, token_amount: u64, ticker: &str, destination: &str, fees: TokenFeeParams) -> Result<CommitRevealBundle> {
        let target_output_amount = self.settings.dust_threshold.saturating_add(fees.reveal_fee);
        let (commit, redeem_script, params) =
            self.build_commit(token_amount, ticker, destination, target_output_amount, FeeType::Exactly(fees.commit_fee))?;
        let reveal = self.build_reveal(&params, &redeem_script, fees.reveal_fee)?;
        debug!("reveal {} spends output 0 of commit {}", reveal.id(), commit.id());
        Ok(CommitRevealBundle { commit, reveal, redeem_script, params })
    }

    /// Rebuilds the reveal transaction of a commit built earlier.
    pub fn build_reveal_for_sign(
        &self,
        params: &IncompleteRevealParams,
        reveal_fee: u64,
    ) -> Result<(UnsignedTransaction, Vec<SigningPreimage>)> {
        let redeem_script = params.envelope.redeem_script(&self.public_key, self.class)?;
        let reveal = self.build_reveal(params, &redeem_script, reveal_fee)?;
        let preimages = reveal.preimages()?;
        Ok((reveal, preimages))
    }

    /// Builds the commit transaction of a token transfer with placeholder signatures,
    /// for measuring its mass.
    pub fn build_krc20_for_mass_calculation(&self, token_amount: u64, ticker: &str, destination: &str, fee_rate: u64) -> Result<TransactionDto> {
        let (commit, _, _) = self.build_commit(token_amount, ticker, destination, self.settings.dust_threshold, FeeType::Rate(fee_rate))?;
        Ok(commit.finalize_with_placeholder(&PLACEHOLDER_SIGNATURE)?.to_dto())
    }

    fn parse_destination(&self, destination: &str) -> Result<LockingScript> {
        Ok(LockingScript::from_address(&self.settings.parse_address(destination)?))
    }

    fn build_payment(&self, payment: PaymentOutput, fee: FeeType) -> Result<UnsignedTransaction> {
        if payment.amount == 0 {
            return Err(Error::ZeroAmount);
        }

        let available = self.store.outputs_available(slice::from_ref(&self.source));
        let available_amount = available.iter().map(UtxoEntryReference::amount).sum::<u64>();
        if payment.amount > available_amount {
            return Err(Error::AmountExceedsAvailable { requested: payment.amount, available: available_amount });
        }

        // rate fees are measured with a change output in place
        let signature_script = placeholder_signature_script(&PLACEHOLDER_SIGNATURE, self.source_redeem_script.as_deref())?;
        let outputs = [payment.clone(), PaymentOutput::new(self.source.clone(), 0)];
        let fee_for =
            |entries: &[UtxoEntryReference]| self.estimator.calc_fee_for_payment(fee, entries.len(), &signature_script, &outputs);

        let selection = select(self.settings.selection_strategy, available, payment.amount, &fee_for)?;
        let fee = fee_for(&selection.entries);
        let resolution =
            resolve_change(selection.aggregate_input_value, payment.amount, fee, self.settings.dust_threshold, self.settings.dust_policy)?;
        let change = resolution.has_change().then(|| PaymentOutput::new(self.source.clone(), resolution.change_value));

        build_unsigned_from_entries(&selection.entries, self.source_redeem_script.as_deref(), &payment, change.as_ref())
    }

    fn build_commit(
        &self,
        token_amount: u64,
        ticker: &str,
        destination: &str,
        target_output_amount: u64,
        fee: FeeType,
    ) -> Result<(UnsignedTransaction, Vec<u8>, IncompleteRevealParams)> {
        if token_amount == 0 {
            return Err(Error::ZeroAmount);
        }
        if ticker.trim().is_empty() {
            return Err(Error::custom("KRC20 ticker must not be empty"));
        }

        let recipient = self.settings.parse_address(destination)?;
        let envelope = Krc20Envelope::transfer(token_amount, ticker, &recipient);
        let redeem_script = envelope.redeem_script(&self.public_key, self.class)?;
        let commit_script = LockingScript::from_address(&script_hash_address(&redeem_script, self.settings.prefix()));

        let commit = self.build_payment(PaymentOutput::new(commit_script, target_output_amount), fee)?;
        let params = IncompleteRevealParams { transaction_id: commit.id(), target_output_amount, envelope };
        debug!("commit {} locks {target_output_amount} for a transfer of {token_amount} {}", commit.id(), params.envelope.tick);
        Ok((commit, redeem_script, params))
    }

    fn build_reveal(&self, params: &IncompleteRevealParams, redeem_script: &[u8], reveal_fee: u64) -> Result<UnsignedTransaction> {
        let target = params.target_output_amount;
        if reveal_fee >= target {
            return Err(Error::InsufficientFunds { required: reveal_fee, available: target });
        }

        let returned = target - reveal_fee;
        if returned < self.settings.dust_threshold {
            match self.settings.dust_policy {
                DustPolicy::Reject => {
                    warn!("rejecting reveal output of {returned} below the dust threshold of {}", self.settings.dust_threshold);
                    return Err(Error::DustOutputRejected { amount: returned, threshold: self.settings.dust_threshold });
                }
                // the reveal has no other output to fold it into
                DustPolicy::FoldIntoFee => debug!("reveal output of {returned} is below the dust threshold of {}", self.settings.dust_threshold),
            }
        }

        let commit_script = LockingScript::from_address(&script_hash_address(redeem_script, self.settings.prefix()));
        let input = InputContext::new(params.outpoint(), commit_script, target, 0, Some(redeem_script.to_vec()));
        let payment = PaymentOutput::new(self.source.clone(), returned);
        build_unsigned(vec![input], &payment, None)
    }
}
