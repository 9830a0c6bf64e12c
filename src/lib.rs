// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cart;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod nav;
pub mod remote;
pub mod report;
pub mod session;
pub mod sync;
pub mod utils;
pub mod view;
