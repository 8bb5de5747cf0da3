// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Everything that can go wrong between argument parsing and the last
/// rendered image. All variants are fatal; the binary logs them and exits
/// non-zero.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} contains invalid number {:?}", path.display(), token)]
    Parse { path: PathBuf, token: String },
    #[error("failed to render {}: {}", path.display(), message)]
    Render { path: PathBuf, message: String },
}

impl Error {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn parse(path: &Path, token: &str) -> Self {
        Error::Parse {
            path: path.to_path_buf(),
            token: token.to_owned(),
        }
    }

    pub(crate) fn render(path: &Path, message: impl ToString) -> Self {
        Error::Render {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }
}
