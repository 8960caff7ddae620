//! Process-wide cache of parser constructors.
//!
//! Parsing many sources with the same grammar would otherwise repeat the
//! constructor lookup for every tokenizer. The cache keys entries by parser
//! type; entries are written once and never evicted.
//!
//! Tokenizers use [`ConstructorCache::global`] unless another cache is
//! injected through the builder, which keeps tests independent of each
//! other.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::rc::Rc;
use std::sync::{Arc, PoisonError, RwLock};

use log::debug;
use once_cell::sync::Lazy;

use crate::buffered::BufferedTokenStream;
use crate::error::Error;
use crate::traits::{Constructor, ParserType};

static GLOBAL: Lazy<Arc<ConstructorCache>> = Lazy::new(|| Arc::new(ConstructorCache::new()));

struct CacheEntry {
    parser: &'static str,
    constructor: Box<dyn Any + Send + Sync>,
}

/// Parser type → constructor map, safe to share between threads.
#[derive(Default)]
pub struct ConstructorCache {
    entries: RwLock<HashMap<TypeId, CacheEntry>>,
}

impl ConstructorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cache shared by every tokenizer that was not given its own.
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL)
    }

    /// Returns the cached constructor for `P`, looking it up on first use.
    ///
    /// The lookup runs under the write lock, so concurrent first callers
    /// observe a single lookup and the same constructor. A failed lookup is
    /// not cached.
    pub fn factory_for<P: ParserType>(&self) -> Result<Constructor<P>, Error> {
        let key = TypeId::of::<P>();
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(constructor) = entries.get(&key).and_then(downcast::<P>) {
                return Ok(constructor);
            }
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        match entries.entry(key) {
            Entry::Occupied(entry) => {
                downcast::<P>(entry.get()).ok_or(Error::ConstructorNotFound { parser: P::NAME })
            }
            Entry::Vacant(entry) => {
                let constructor =
                    P::constructor().ok_or(Error::ConstructorNotFound { parser: P::NAME })?;
                debug!("cached constructor for parser `{}`", P::NAME);
                entry.insert(CacheEntry {
                    parser: P::NAME,
                    constructor: Box::new(constructor),
                });
                Ok(constructor)
            }
        }
    }

    /// Builds a `P` bound to `input`.
    ///
    /// A constructor that fails is reported as [`Error::Construction`].
    pub fn build<P: ParserType>(
        &self,
        input: Rc<BufferedTokenStream<P::Token>>,
    ) -> Result<P, Error> {
        let constructor = self.factory_for::<P>()?;
        constructor(input).map_err(|source| Error::Construction {
            parser: P::NAME,
            source,
        })
    }

    pub fn contains<P: ParserType>(&self) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&TypeId::of::<P>())
    }

    /// Names of the cached parser types, sorted.
    pub fn parsers(&self) -> Vec<&'static str> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<_> = entries.values().map(|entry| entry.parser).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl core::fmt::Debug for ConstructorCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ConstructorCache")
            .field("parsers", &self.parsers())
            .finish()
    }
}

fn downcast<P: ParserType>(entry: &CacheEntry) -> Option<Constructor<P>> {
    entry.constructor.downcast_ref::<Constructor<P>>().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConstructError, RecognitionError};
    use crate::listeners::ErrorListeners;
    use crate::token::CommonToken;
    use crate::traits::{Parser, PredictionMode};
    use core::marker::PhantomData;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    trait Lookups: 'static {
        const NAME: &'static str;
        fn counter() -> &'static AtomicUsize;
        fn available() -> bool {
            true
        }
        fn fails() -> bool {
            false
        }
    }

    struct StubParser<K> {
        input: Rc<BufferedTokenStream<CommonToken>>,
        listeners: ErrorListeners,
        _kind: PhantomData<K>,
    }

    impl<K: Lookups> Parser for StubParser<K> {
        type Token = CommonToken;

        fn token_stream(&self) -> &Rc<BufferedTokenStream<CommonToken>> {
            &self.input
        }

        fn listeners(&self) -> &ErrorListeners {
            &self.listeners
        }

        fn listeners_mut(&mut self) -> &mut ErrorListeners {
            &mut self.listeners
        }

        fn prediction_mode(&self) -> PredictionMode {
            PredictionMode::Ll
        }

        fn set_prediction_mode(&mut self, _: PredictionMode) -> Result<(), RecognitionError> {
            Ok(())
        }

        fn reset(&mut self) {}

        fn syntax_errors(&self) -> usize {
            0
        }
    }

    impl<K: Lookups> ParserType for StubParser<K> {
        const NAME: &'static str = K::NAME;

        fn constructor() -> Option<Constructor<Self>> {
            K::counter().fetch_add(1, Ordering::SeqCst);
            if !K::available() {
                return None;
            }
            Some(|input| {
                if K::fails() {
                    return Err(ConstructError::from("refused"));
                }
                Ok(StubParser {
                    input,
                    listeners: ErrorListeners::new(),
                    _kind: PhantomData,
                })
            })
        }
    }

    macro_rules! lookups {
        ($name:ident $(, $method:ident => $value:expr)*) => {
            struct $name;
            impl Lookups for $name {
                const NAME: &'static str = stringify!($name);
                fn counter() -> &'static AtomicUsize {
                    static COUNT: AtomicUsize = AtomicUsize::new(0);
                    &COUNT
                }
                $(fn $method() -> bool { $value })*
            }
        };
    }

    lookups!(Alpha);
    lookups!(Beta);
    lookups!(Gamma);
    lookups!(Racy);
    lookups!(Missing, available => false);
    lookups!(Refusing, fails => true);

    fn input() -> Rc<BufferedTokenStream<CommonToken>> {
        Rc::new(BufferedTokenStream::from_tokens(vec![CommonToken::eof(0)]))
    }

    #[test]
    fn test_lookup_once_per_type() {
        let cache = ConstructorCache::new();
        let first = cache.factory_for::<StubParser<Alpha>>().unwrap();
        let second = cache.factory_for::<StubParser<Alpha>>().unwrap();
        assert_eq!(first as usize, second as usize);
        assert_eq!(Alpha::counter().load(Ordering::SeqCst), 1);

        cache.factory_for::<StubParser<Beta>>().unwrap();
        assert_eq!(Beta::counter().load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.parsers(), ["Alpha", "Beta"]);
    }

    #[test]
    fn test_missing_constructor() {
        let cache = ConstructorCache::new();
        let err = cache.build::<StubParser<Missing>>(input()).err().unwrap();
        assert!(matches!(err, Error::ConstructorNotFound { parser: "Missing" }));
        assert!(!cache.contains::<StubParser<Missing>>());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_construction_failure_is_wrapped() {
        let cache = ConstructorCache::new();
        let err = cache.build::<StubParser<Refusing>>(input()).err().unwrap();
        assert!(matches!(err, Error::Construction { parser: "Refusing", .. }));
        assert!(cache.contains::<StubParser<Refusing>>());
    }

    #[test]
    fn test_build_binds_stream() {
        let cache = ConstructorCache::new();
        let stream = input();
        let parser = cache.build::<StubParser<Gamma>>(Rc::clone(&stream)).unwrap();
        assert!(Rc::ptr_eq(parser.token_stream(), &stream));
    }

    #[test]
    fn test_concurrent_first_write() {
        let cache = Arc::new(ConstructorCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.factory_for::<StubParser<Racy>>().map(|c| c as usize))
            })
            .collect();

        let addrs: Vec<usize> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect();

        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(Racy::counter().load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }
}
