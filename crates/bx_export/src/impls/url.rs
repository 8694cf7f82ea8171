use alloc::borrow::Cow;

use url::Url;

use crate::{Export, ExportKind};

impl Export for Url {
    #[inline]
    fn export_kind(&self) -> ExportKind<'_> {
        ExportKind::Text(Cow::Borrowed(self.as_str()))
    }
}
