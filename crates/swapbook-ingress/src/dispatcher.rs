//! Function dispatch.
//!
//! Routes `(function, args)` from the host to engine operations. Arguments
//! are validated before the engine is touched, so a malformed call never
//! writes. `delete`, `set_owner` and `execute_swap` can strand open offers,
//! so each is followed by a reconciliation pass.
//!
//! ## Functions
//!
//! ```text
//! init(genesis)
//! write(key, value)
//! create_item(name, kind, quantity, owner)
//! set_owner(name, new_owner)
//! delete(name)
//! read(name)                                                  [query]
//! list_items()                                                [query]
//! open_order(creator, kind, qty, kind1, qty1, [kind2, qty2, ...])
//! execute_swap(order_id, closer, closer_item, [opener,] kind, qty)
//! remove_order(order_id)
//! ```

use std::fmt;
use std::str::FromStr;

use swapbook_engine::{Clock, Engine, SwapRequest, SystemClock};
use swapbook_ledger::StateStore;
use swapbook_types::codec::encode;
use swapbook_types::{Description, EngineConfig, Item, OrderId, Result, SwapbookError, constants};

use crate::args::Args;

/// Every routed function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Init,
    Write,
    CreateItem,
    SetOwner,
    Delete,
    Read,
    ListItems,
    OpenOrder,
    ExecuteSwap,
    RemoveOrder,
}

impl Function {
    pub const ALL: [Self; 10] = [
        Self::Init,
        Self::Write,
        Self::CreateItem,
        Self::SetOwner,
        Self::Delete,
        Self::Read,
        Self::ListItems,
        Self::OpenOrder,
        Self::ExecuteSwap,
        Self::RemoveOrder,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Write => "write",
            Self::CreateItem => "create_item",
            Self::SetOwner => "set_owner",
            Self::Delete => "delete",
            Self::Read => "read",
            Self::ListItems => "list_items",
            Self::OpenOrder => "open_order",
            Self::ExecuteSwap => "execute_swap",
            Self::RemoveOrder => "remove_order",
        }
    }

    /// Read-only functions, routable through [`Dispatcher::query`].
    #[must_use]
    pub fn is_query(self) -> bool {
        matches!(self, Self::Read | Self::ListItems)
    }

    /// Functions followed by a reconciliation pass.
    #[must_use]
    pub fn reconciles(self) -> bool {
        matches!(self, Self::Delete | Self::SetOwner | Self::ExecuteSwap)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Function {
    type Err = SwapbookError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| SwapbookError::UnknownFunction(s.to_string()))
    }
}

/// Validates arguments and routes calls to the engine.
#[derive(Debug)]
pub struct Dispatcher<C: Clock = SystemClock> {
    engine: Engine<C>,
}

impl Dispatcher<SystemClock> {
    pub fn new(config: EngineConfig) -> Result<Self> {
        Ok(Self::with_engine(Engine::new(config)?))
    }
}

impl<C: Clock> Dispatcher<C> {
    #[must_use]
    pub fn with_engine(engine: Engine<C>) -> Self {
        Self { engine }
    }

    #[must_use]
    pub fn engine(&self) -> &Engine<C> {
        &self.engine
    }

    /// Run any routed function, mutating or not.
    pub fn invoke<S: StateStore>(
        &self,
        store: &mut S,
        function: &str,
        args: &[&str],
    ) -> Result<Option<Vec<u8>>> {
        let func: Function = function.parse()?;
        let args = Args::new(func.name(), args);

        let payload = match func {
            Function::Init => self.init(store, args)?,
            Function::Write => self.write(store, args)?,
            Function::CreateItem => self.create_item(store, args)?,
            Function::SetOwner => self.set_owner(store, args)?,
            Function::Delete => self.delete(store, args)?,
            Function::OpenOrder => self.open_order(store, args)?,
            Function::ExecuteSwap => self.execute_swap(store, args)?,
            Function::RemoveOrder => self.remove_order(store, args)?,
            Function::Read | Function::ListItems => self.route_query(store, func, args)?,
        };

        if func.reconciles() {
            self.engine.reconcile(store)?;
        }
        Ok(payload)
    }

    /// Run a read-only function.
    ///
    /// # Errors
    /// - `UnknownFunction` for names that are not queries
    pub fn query<S: StateStore>(
        &self,
        store: &S,
        function: &str,
        args: &[&str],
    ) -> Result<Option<Vec<u8>>> {
        let func: Function = function.parse()?;
        if !func.is_query() {
            return Err(SwapbookError::UnknownFunction(function.to_string()));
        }
        self.route_query(store, func, Args::new(func.name(), args))
    }

    fn route_query<S: StateStore>(
        &self,
        store: &S,
        func: Function,
        args: Args<'_>,
    ) -> Result<Option<Vec<u8>>> {
        match func {
            Function::Read => {
                args.exactly(1)?;
                self.engine.read(store, args.str(0)?)
            }
            Function::ListItems => {
                args.exactly(0)?;
                Ok(Some(encode(&self.engine.list_items(store)?)?))
            }
            other => Err(SwapbookError::UnknownFunction(other.name().to_string())),
        }
    }

    // =================================================================
    // Mutating functions
    // =================================================================

    fn init<S: StateStore>(&self, store: &mut S, args: Args<'_>) -> Result<Option<Vec<u8>>> {
        args.exactly(1)?;
        let genesis: i64 = args.int(0)?;
        self.engine.reset(store)?;
        tracing::info!(
            genesis,
            engine = constants::ENGINE_NAME,
            version = constants::VERSION,
            "Ledger initialised"
        );
        Ok(None)
    }

    fn write<S: StateStore>(&self, store: &mut S, args: Args<'_>) -> Result<Option<Vec<u8>>> {
        args.exactly(2)?;
        let key = args.str(0)?;
        if self.engine.config().keys.is_reserved(key) {
            return Err(SwapbookError::ReservedKey(key.to_string()));
        }
        store.put(key, args.str(1)?.as_bytes().to_vec())?;
        tracing::info!(key = %key, "Raw value written");
        Ok(None)
    }

    fn create_item<S: StateStore>(&self, store: &mut S, args: Args<'_>) -> Result<Option<Vec<u8>>> {
        args.exactly(constants::CREATE_ITEM_ARGS)?;
        let name = args.non_empty(0)?;
        let kind = args.non_empty(1)?.to_lowercase();
        args.non_empty(2)?;
        let owner = args.non_empty(3)?;
        let quantity: i64 = args.int(2)?;

        self.engine
            .create_item(store, Item::new(name, kind, quantity, owner))?;
        Ok(None)
    }

    fn set_owner<S: StateStore>(&self, store: &mut S, args: Args<'_>) -> Result<Option<Vec<u8>>> {
        args.at_least(2)?;
        self.engine.set_owner(store, args.str(0)?, args.str(1)?)?;
        Ok(None)
    }

    fn delete<S: StateStore>(&self, store: &mut S, args: Args<'_>) -> Result<Option<Vec<u8>>> {
        args.exactly(1)?;
        self.engine.delete_item(store, args.str(0)?)?;
        Ok(None)
    }

    /// Returns the new order's id as a decimal string.
    fn open_order<S: StateStore>(&self, store: &mut S, args: Args<'_>) -> Result<Option<Vec<u8>>> {
        args.at_least(constants::MIN_OPEN_ORDER_ARGS)?;
        args.odd()?;

        let creator = args.str(0)?;
        let wanted = Description::new(args.str(1)?, args.int(2)?);
        let mut offered = Vec::with_capacity((args.len() - 3) / 2);
        for idx in (3..args.len()).step_by(2) {
            offered.push(Description::new(args.str(idx)?, args.int(idx + 1)?));
        }

        let order = self.engine.open_order(store, creator, wanted, offered)?;
        Ok(Some(order.id.as_millis().to_string().into_bytes()))
    }

    fn execute_swap<S: StateStore>(
        &self,
        store: &mut S,
        args: Args<'_>,
    ) -> Result<Option<Vec<u8>>> {
        args.one_of(&[constants::EXECUTE_SWAP_ARGS, constants::LEGACY_EXECUTE_SWAP_ARGS])?;

        let order_id = OrderId::from_millis(args.int(0)?);
        // The legacy layout carries the opener's user id at position 4; it is not used.
        let shape_at = args.len() - 2;
        let request = SwapRequest {
            order_id,
            closer: args.str(1)?.to_string(),
            closer_item: args.str(2)?.to_string(),
            counter: Description::new(args.str(shape_at)?, args.int(shape_at + 1)?),
        };

        let outcome = self.engine.execute_swap(store, &request)?;
        tracing::debug!(order = %order_id, ?outcome, "Swap dispatched");
        Ok(None)
    }

    fn remove_order<S: StateStore>(
        &self,
        store: &mut S,
        args: Args<'_>,
    ) -> Result<Option<Vec<u8>>> {
        args.at_least(1)?;
        let id = OrderId::from_millis(args.int(0)?);
        self.engine.remove_order(store, id)?;
        Ok(None)
    }
}
