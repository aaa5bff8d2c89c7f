// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! canvas-replay: drive an image canvas from a JSON script

fn main() -> anyhow::Result<()> {
    image_canvas::run()
}
