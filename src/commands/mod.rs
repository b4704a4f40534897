// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod costs;
pub mod breakdown;
pub mod months;
pub mod export;
pub mod doctor;
