// SPDX-License-Identifier: Apache-2.0

//! File-tailing source core for a log shipping agent.
//!
//! This crate tracks append-only log files through rotation, rename, and
//! truncation, and turns raw lines into positioned, uniquely-identified
//! records. The central type is [`source::Job`], the per-file tracking unit
//! owned by whichever reader currently holds it; the discovery loop and the
//! reader worker pool are external collaborators that exchange jobs through
//! the bounded hand-off queue in [`bounded_channel`].

pub mod bounded_channel;
pub mod source;
