// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod admin;
pub mod auth;
pub mod export;
pub mod listing;
pub mod page;
pub mod seller;
pub mod settings;
