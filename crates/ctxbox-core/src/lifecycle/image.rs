use std::path::Path;

use ctxbox_docker::BuildSpec;

use crate::config::Location;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::identity::{container_name, image_tag};

/// Where a context's image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A registry image, pulled on demand
    Registry(String),
    /// An image built locally from a Dockerfile
    Built(BuildSpec),
}

impl ImageSource {
    /// The image reference containers are created from.
    pub fn reference(&self) -> &str {
        match self {
            Self::Registry(image) => image,
            Self::Built(spec) => &spec.tag,
        }
    }
}

/// A resolved context ready to run: image decided and container named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prepared {
    pub container: String,
    pub context: Context,
    pub image: ImageSource,
}

/// Decide the image for a resolved context and compute its container name.
///
/// A context without `image` but with `build.dockerfile` gets the tag of its
/// Dockerfile content and build args, so editing the Dockerfile changes the
/// container name as well.
pub fn prepare(location: &Location, mut context: Context) -> Result<Prepared> {
    let image = if !context.image.is_empty() {
        ImageSource::Registry(context.image.clone())
    } else if !context.build.dockerfile.is_empty() {
        let dockerfile = Path::new(&context.build.dockerfile);
        let content =
            std::fs::read(dockerfile).map_err(|e| ctxbox_fs::Error::io(dockerfile, e))?;
        let tag = image_tag(&content, &context.build.args);

        let mut args: Vec<(String, String)> = context
            .build
            .args
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        args.sort();

        context.image = tag.clone();
        ImageSource::Built(BuildSpec {
            dockerfile: context.build.dockerfile.clone(),
            tag,
            args,
            context: Some(context.build.context.clone()).filter(|c| !c.is_empty()),
        })
    } else {
        return Err(Error::MissingImage {
            context: context.name.clone(),
        });
    };

    let container = container_name(location, &context);
    tracing::debug!(container = %container, image = image.reference(), "prepared context");

    Ok(Prepared {
        container,
        context,
        image,
    })
}

/// Whether a registry image should be pulled before creating a container.
///
/// Untagged and `latest` images are always refreshed; digests and other tags
/// are only pulled when forced.
pub fn should_pull(image: &str) -> bool {
    if image.contains('@') {
        return false;
    }
    let name = image.rsplit('/').next().unwrap_or(image);
    match name.split_once(':') {
        Some((_, tag)) => tag.is_empty() || tag == "latest",
        None => true,
    }
}
