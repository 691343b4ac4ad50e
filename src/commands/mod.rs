// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod transactions;
pub mod budgets;
pub mod goals;
pub mod reports;
pub mod exporter;
pub mod profile;
pub mod friends;
pub mod settings;
pub mod game;
pub mod autosave;
