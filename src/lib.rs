// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod autosave;
pub mod calc;
pub mod cli;
pub mod commands;
pub mod db;
pub mod gamification;
pub mod models;
pub mod startup;
pub mod store;
pub mod utils;
