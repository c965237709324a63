//! This crate provides generic linked-list chains with owned nodes: a
//! forward-only [`ForwardChain`] and a doubly-linked [`BidirChain`], both
//! exposed through the common [`Chain`] interface, plus a lock-guarded
//! [`SyncChain`] handle for sharing a chain between threads.
//!
//! Here is a quick example showing how the chains work.
//!
//! ```
//! use chainlist::ForwardChain;
//!
//! let mut chain: ForwardChain<_> = (1..=3).collect();
//!
//! chain.push_front(0);
//! chain.insert(4, 4)?; // the one-past-end position appends
//! assert_eq!(chain.to_string(), "0->1->2->3->4");
//!
//! assert_eq!(chain.remove_at(2), Ok(2));
//! chain.reverse();
//! assert_eq!(chain.to_string(), "4->3->1->0");
//! # Ok::<(), chainlist::ChainError>(())
//! ```
//!
//! # Memory Layout
//!
//! Each node is allocated on the heap and owned exclusively by its chain;
//! the forward links are the single ownership path. The layout of a
//! [`BidirChain`] is like the following graph (a [`ForwardChain`] is the
//! same without the `prev` row):
//!
//! ```text
//!    ╔═══════════╗ ────────→ ╔═══════════╗ ────────→ ┄┄ ────────→ ∅
//!    ║   next    ║           ║   next    ║
//!    ╟───────────╢           ╟───────────╢
//! ∅ ←║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄
//!    ╟───────────╢           ╟───────────╢
//!    ║  item T   ║           ║  item T   ║
//!    ╚═══════════╝           ╚═══════════╝
//!      Node 0 (head)           Node 1                 Node n-1 (tail)
//!
//! ╔═══════════╦═══════════╦═══════════╗
//! ║   head    ║   tail    ║    len    ║
//! ╚═══════════╩═══════════╩═══════════╝
//!     Chain
//! ```
//!
//! The chain keeps an owning `head` reference, a lookup-only `tail`
//! reference and the element count `len`; `head` and `tail` are both
//! `None` exactly when `len == 0`. In a [`BidirChain`] every node's
//! back-reference mirrors the forward structure: `head.prev` and
//! `tail.next` are always `None`, and a node's successor always points
//! back at it. Every structural operation maintains both directions of
//! linkage in a single consistent transition.
//!
//! # Searching and the textual-match rule
//!
//! [`contains`], [`remove`], [`update`] and [`dedup_adjacent`] match
//! elements on their `Display` renderings rather than `PartialEq`: two
//! items are the same iff their string renderings are equal. Two distinct
//! values that render identically are deliberately conflated: this is
//! the authoritative matching rule, not an approximation of structural
//! equality.
//!
//! # Pointer diagnostics
//!
//! [`has_cycle`] (Floyd's tortoise-and-hare) and [`find_middle`] (the
//! same two-pointer sweep) operate on the raw link structure. The public
//! API never produces a cycle; the diagnostic exists to validate the
//! termination invariant for chains whose nodes were wired up directly.
//!
//! # Thread safety
//!
//! The plain chain types are single-threaded values: Rust's borrow rules
//! already make a mutation racing a traversal unrepresentable. To share
//! one chain between threads, wrap it in a [`SyncChain`]: mutations
//! serialize behind a chain-wide write lock held for the operation's full
//! duration, and queries take the read lock, so no caller ever observes
//! a partially-applied transition.
//!
//! ```
//! use chainlist::SyncForwardChain;
//!
//! let chain = SyncForwardChain::new();
//! let handle = chain.clone();
//! std::thread::spawn(move || handle.push_back(1)).join().unwrap();
//! assert_eq!(chain.snapshot(), vec![1]);
//! ```
//!
//! [`contains`]: ForwardChain::contains
//! [`remove`]: ForwardChain::remove
//! [`update`]: ForwardChain::update
//! [`dedup_adjacent`]: ForwardChain::dedup_adjacent
//! [`has_cycle`]: ForwardChain::has_cycle
//! [`find_middle`]: ForwardChain::find_middle

#[doc(inline)]
pub use bidir::BidirChain;
#[doc(inline)]
pub use error::ChainError;
#[doc(inline)]
pub use forward::ForwardChain;
#[doc(inline)]
pub use sync::{SyncBidirChain, SyncChain, SyncForwardChain};
#[doc(inline)]
pub use traits::Chain;

pub mod bidir;
pub mod error;
pub mod forward;
pub mod sync;
pub mod traits;
