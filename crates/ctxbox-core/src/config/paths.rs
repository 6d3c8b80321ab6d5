//! Anchoring document-relative paths before merging

use std::path::Path;

use ctxbox_fs::{expand_home, resolve_relative};

use super::Location;
use crate::context::Context;

/// Rewrite `build.dockerfile`, `build.context` and mount sources of a freshly
/// parsed document so they no longer depend on where the document lives.
///
/// Paths in remote documents only get `~/` expanded.
pub(crate) fn anchor_paths(context: &mut Context, location: &Location, home: Option<&Path>) {
    let dir = location.dir();
    let resolve = |raw: &str| -> String {
        match location {
            Location::Local(_) => resolve_relative(Path::new(&dir), raw, home),
            Location::Remote(_) if raw.is_empty() => String::new(),
            Location::Remote(_) => expand_home(raw, home).to_string_lossy().into_owned(),
        }
    };
    anchor(context, &resolve);
}

fn anchor(context: &mut Context, resolve: &dyn Fn(&str) -> String) {
    context.build.dockerfile = resolve(&context.build.dockerfile);
    context.build.context = resolve(&context.build.context);
    context.mounts = std::mem::take(&mut context.mounts)
        .into_iter()
        .map(|(source, target)| (resolve(&source), target))
        .collect();

    for layer in context.layers.iter_mut() {
        for child in layer.contexts.values_mut() {
            anchor(child, resolve);
        }
    }
}
