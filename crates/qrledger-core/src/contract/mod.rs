#[cfg(test)]
mod tests;

use crate::{
    ASSET_CREATED_EVENT,
    asset::{AssetCreated, QrAsset, bootstrap_assets},
    config::LedgerConfig,
    context::StateContext,
    error::ContractError,
    key::AssetKey,
    obs::sink::{MetricsEvent, OpKind, Span},
    serialize::{SerializeError, deserialize, deserialize_bounded, serialize},
};

///
/// AssetContract
///
/// The four ledger operations. Holds configuration only; every call receives
/// the host context explicitly and keeps no state between calls.
///

#[derive(Clone, Debug, Default)]
pub struct AssetContract {
    config: LedgerConfig,
}

impl AssetContract {
    #[must_use]
    pub const fn new(config: LedgerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &LedgerConfig {
        &self.config
    }

    fn debug_log(&self, s: impl AsRef<str>) {
        if self.config.debug {
            println!("[debug] {}", s.as_ref());
        }
    }

    /// Seed world state with the bootstrap records.
    ///
    /// Stops at the first failure; records already written in this call stay
    /// written and the host transaction decides whether they commit.
    pub fn init_ledger<C>(&self, ctx: &mut C) -> Result<(), ContractError>
    where
        C: StateContext + ?Sized,
    {
        let span = Span::new(OpKind::InitLedger, self.config.metrics);
        let result = self.seed(ctx, &span);

        self.finish(OpKind::InitLedger, span, result)
    }

    /// True iff a non-empty value is stored under the asset's key.
    pub fn asset_exists<C>(&self, ctx: &C, product_id: &str) -> Result<bool, ContractError>
    where
        C: StateContext + ?Sized,
    {
        let span = Span::new(OpKind::Exists, self.config.metrics);
        let result = Self::exists(ctx, product_id);
        if let Ok(exists) = &result {
            self.debug_log(format!("asset_exists: {product_id} -> {exists}"));
        }

        self.finish(OpKind::Exists, span, result)
    }

    /// Decode, reject duplicates, stamp the discriminator, write, then notify.
    ///
    /// A notification failure is reported after the write has already been
    /// issued; the write is not undone here.
    pub fn create_asset<C>(&self, ctx: &mut C, payload: &[u8]) -> Result<(), ContractError>
    where
        C: StateContext + ?Sized,
    {
        let span = Span::new(OpKind::Create, self.config.metrics);
        let result = self.create(ctx, payload, &span);

        self.finish(OpKind::Create, span, result)
    }

    /// Load and decode the asset stored under `product_id`.
    pub fn read_asset<C>(&self, ctx: &C, product_id: &str) -> Result<QrAsset, ContractError>
    where
        C: StateContext + ?Sized,
    {
        let span = Span::new(OpKind::Read, self.config.metrics);
        let result = self.read(ctx, product_id, &span);

        self.finish(OpKind::Read, span, result)
    }

    // Close the span; failures are logged with their class and origin.
    fn finish<T>(
        &self,
        op: OpKind,
        mut span: Span,
        result: Result<T, ContractError>,
    ) -> Result<T, ContractError> {
        match &result {
            Ok(_) => span.succeed(),
            Err(err) => {
                self.debug_log(format!("{}: {}", op.as_str(), err.display_with_class()));
            }
        }

        result
    }

    // ------------------------------------------------------------------
    // Operation bodies
    // ------------------------------------------------------------------

    fn seed<C>(&self, ctx: &mut C, span: &Span) -> Result<(), ContractError>
    where
        C: StateContext + ?Sized,
    {
        let assets = bootstrap_assets();
        for asset in &assets {
            Self::put_asset(ctx, asset, span)?;
        }
        self.debug_log(format!("init_ledger: seeded {} asset(s)", assets.len()));

        Ok(())
    }

    fn create<C>(&self, ctx: &mut C, payload: &[u8], span: &Span) -> Result<(), ContractError>
    where
        C: StateContext + ?Sized,
    {
        let mut asset: QrAsset = deserialize_bounded(payload, self.config.max_payload_bytes)
            .map_err(ContractError::payload)?;
        if asset.product_id.is_empty() {
            return Err(ContractError::payload(SerializeError::Decode(
                "productId must not be empty".into(),
            )));
        }

        if Self::exists(ctx, &asset.product_id)? {
            span.record(MetricsEvent::DuplicateRejected);

            return Err(ContractError::DuplicateKey {
                product_id: asset.product_id,
            });
        }

        asset.stamp_doc_type();
        Self::put_asset(ctx, &asset, span)?;

        let event = serialize(&AssetCreated::new(asset.product_id.clone())).map_err(|source| {
            ContractError::Serialization {
                product_id: asset.product_id.clone(),
                source,
            }
        })?;
        ctx.set_event(ASSET_CREATED_EVENT, event)
            .map_err(ContractError::Notification)?;
        span.record(MetricsEvent::EventEmitted);
        self.debug_log(format!("create_asset: wrote {}", asset.key()));

        Ok(())
    }

    fn read<C>(&self, ctx: &C, product_id: &str, span: &Span) -> Result<QrAsset, ContractError>
    where
        C: StateContext + ?Sized,
    {
        let key = AssetKey::from_product_id(product_id);

        let Some(bytes) = Self::load(ctx, &key)? else {
            span.record(MetricsEvent::NotFound);

            return Err(ContractError::NotFound {
                product_id: product_id.to_string(),
            });
        };

        let asset: QrAsset =
            deserialize(&bytes).map_err(|source| ContractError::stored(key.as_str(), source))?;

        // Records are returned whatever their discriminator says.
        if !asset.is_asset() {
            self.debug_log(format!(
                "read_asset: {key} carries docType {:?}",
                asset.doc_type
            ));
        }
        self.debug_log(format!("read_asset: {key} ({} bytes)", bytes.len()));

        Ok(asset)
    }

    // ------------------------------------------------------------------
    // Store access
    // ------------------------------------------------------------------

    // Empty values count as absent.
    fn load<C>(ctx: &C, key: &AssetKey) -> Result<Option<Vec<u8>>, ContractError>
    where
        C: StateContext + ?Sized,
    {
        let bytes = ctx
            .get_state(key.as_str())
            .map_err(ContractError::StoreRead)?;

        Ok(bytes.filter(|b| !b.is_empty()))
    }

    fn exists<C>(ctx: &C, product_id: &str) -> Result<bool, ContractError>
    where
        C: StateContext + ?Sized,
    {
        let key = AssetKey::from_product_id(product_id);

        Ok(Self::load(ctx, &key)?.is_some())
    }

    fn put_asset<C>(ctx: &mut C, asset: &QrAsset, span: &Span) -> Result<(), ContractError>
    where
        C: StateContext + ?Sized,
    {
        let bytes = serialize(asset).map_err(|source| ContractError::Serialization {
            product_id: asset.product_id.clone(),
            source,
        })?;
        let len = bytes.len() as u64;

        ctx.put_state(asset.key().as_str(), bytes)
            .map_err(ContractError::StoreWrite)?;
        span.record(MetricsEvent::RecordWritten { bytes: len });

        Ok(())
    }
}
