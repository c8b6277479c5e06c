// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ledgerdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ledgerdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Tabs name open documents; drafts hold unsaved form state for the business records the
//! documents edit.

pub mod counterparty;
pub mod draft;
pub mod entity;
pub mod field;
pub mod ids;
pub mod nomenclature;
pub mod organization;
pub mod tab;

pub use counterparty::CounterpartyDraft;
pub use draft::Draft;
pub use entity::{EntityKind, EntitySummary, ParseEntityKindError};
pub use field::{Choice, FieldError, FieldValue};
pub use ids::{EntityId, Id, IdError};
pub use nomenclature::NomenclatureDraft;
pub use organization::{OrgType, OrganizationDraft, PhysicalStatus, Taxation};
pub use tab::Tab;
