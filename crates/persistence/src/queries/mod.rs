// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only database operations, grouped by table.

pub mod audit;
pub mod leads;
pub mod sessions;
pub mod teams;
pub mod users;
