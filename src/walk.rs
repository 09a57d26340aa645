//! Ordered Enumerator
//!
//! One lazy walk reused by every namespace and by node enumeration.
//!
//! A `Cursor` describes a key domain with five function pointers:
//! ```text
//! first(host, container)       → key | none
//! last(host, container)        → key | none
//! next(host, container, key)   → key | none
//! prev(host, container, key)   → key | none
//! read(host, container, key)   → value | none
//! ```
//!
//! ## Walk
//! Forward: seed with `first`, step with `next` until the key equals `last`.
//! Backward: seed with `last`, step with `prev` until the key equals `first`.
//! The walk is closed (both endpoints are yielded once, also when
//! `first == last`) and ends early if a step finds no key.
//!
//! Nothing is read from the host until the first call to `next()`, and each
//! call performs a single step. The walk holds no snapshot: mutating the
//! container while walking has undefined effect on what is yielded next.

use std::iter::FusedIterator;

/// Addressing and read primitives for one key domain
pub struct Cursor<P: ?Sized, C, K, V> {
    pub first: fn(&P, C) -> Option<K>,
    pub last: fn(&P, C) -> Option<K>,
    pub next: fn(&P, C, &K) -> Option<K>,
    pub prev: fn(&P, C, &K) -> Option<K>,
    pub read: fn(&P, C, &K) -> Option<V>,
}

impl<P: ?Sized, C, K, V> Clone for Cursor<P, C, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: ?Sized, C, K, V> Copy for Cursor<P, C, K, V> {}

/// Walk direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// What decides whether a walk starts at all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Trust `first`/`last`; yield whatever `read` returns
    Key,

    /// Yield nothing when the seed key reads as absent
    Value,
}

enum State<K> {
    /// Endpoints not queried yet
    Fresh,

    /// Last yielded key and the key that ends the walk
    At { current: K, end: K },

    Done,
}

/// Lazy, single-pass walk over a key domain
///
/// Items are `(key, value)` where the value is `None` if the read found
/// nothing at a key the addressing primitives reported.
pub struct Walk<'a, P: ?Sized, C, K, V> {
    host: &'a P,
    container: C,
    cursor: Cursor<P, C, K, V>,
    direction: Direction,
    presence: Presence,
    state: State<K>,
}

impl<'a, P, C, K, V> Walk<'a, P, C, K, V>
where
    P: ?Sized,
    C: Copy,
    K: Clone + PartialEq,
{
    pub fn new(
        host: &'a P,
        container: C,
        cursor: Cursor<P, C, K, V>,
        direction: Direction,
        presence: Presence,
    ) -> Self {
        Self {
            host,
            container,
            cursor,
            direction,
            presence,
            state: State::Fresh,
        }
    }

    pub fn forward(host: &'a P, container: C, cursor: Cursor<P, C, K, V>, presence: Presence) -> Self {
        Self::new(host, container, cursor, Direction::Forward, presence)
    }

    pub fn backward(host: &'a P, container: C, cursor: Cursor<P, C, K, V>, presence: Presence) -> Self {
        Self::new(host, container, cursor, Direction::Backward, presence)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Keys only
    pub fn keys(self) -> impl Iterator<Item = K> + 'a
    where
        C: 'a,
        K: 'a,
        V: 'a,
    {
        self.map(|(key, _)| key)
    }

    fn read(&self, key: &K) -> Option<V> {
        (self.cursor.read)(self.host, self.container, key)
    }

    fn seed(&mut self) -> Option<(K, Option<V>)> {
        let first = (self.cursor.first)(self.host, self.container);
        let last = (self.cursor.last)(self.host, self.container);
        let (seed, end) = match self.direction {
            Direction::Forward => (first, last),
            Direction::Backward => (last, first),
        };

        let seed = seed?;
        let end = end.unwrap_or_else(|| seed.clone());

        let value = self.read(&seed);
        if self.presence == Presence::Value && value.is_none() {
            return None;
        }

        if seed != end {
            self.state = State::At {
                current: seed.clone(),
                end,
            };
        }
        Some((seed, value))
    }

    fn step(&mut self, current: K, end: K) -> Option<(K, Option<V>)> {
        let step = match self.direction {
            Direction::Forward => self.cursor.next,
            Direction::Backward => self.cursor.prev,
        };

        let key = step(self.host, self.container, &current)?;
        let value = self.read(&key);

        if key != end {
            self.state = State::At {
                current: key.clone(),
                end,
            };
        }
        Some((key, value))
    }
}

impl<'a, P, C, K, V> Iterator for Walk<'a, P, C, K, V>
where
    P: ?Sized,
    C: Copy,
    K: Clone + PartialEq,
{
    type Item = (K, Option<V>);

    fn next(&mut self) -> Option<Self::Item> {
        // Every branch either re-arms the state or leaves it Done
        match std::mem::replace(&mut self.state, State::Done) {
            State::Done => None,
            State::Fresh => self.seed(),
            State::At { current, end } => self.step(current, end),
        }
    }
}

impl<'a, P, C, K, V> FusedIterator for Walk<'a, P, C, K, V>
where
    P: ?Sized,
    C: Copy,
    K: Clone + PartialEq,
{
}
