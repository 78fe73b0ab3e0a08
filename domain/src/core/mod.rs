//! Core domain concepts shared across all subdomains.
//!
//! - [`question::Question`] - a validated, non-blank question
//! - [`regulatory_domain::RegulatoryDomain`] - Pix or Open Finance
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod question;
pub mod regulatory_domain;
pub mod string;
