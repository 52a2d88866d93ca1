//! Publishing the UID to the clipboard.

use crate::error::SiteError;
use crate::notification::NotificationPresenter;
use crate::site::Ctx;
use crate::surface::Surface;

#[derive(Debug, Default)]
pub struct ClipboardPublisher {
    pending: bool,
}

impl ClipboardPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Copies the configured UID, preferring the asynchronous clipboard API.
    ///
    /// With the API available the result arrives later through
    /// [`ClipboardPublisher::settled`].
    pub fn copy_uid<S: Surface>(
        &mut self,
        ctx: &mut Ctx<S>,
        notifications: &mut NotificationPresenter,
    ) -> Result<(), SiteError> {
        let uid = ctx.config.uid.clone();
        if ctx.surface.clipboard_available() {
            self.pending = true;
            ctx.surface.begin_clipboard_write(&uid);
            return Ok(());
        }
        self.fallback(ctx, notifications, &uid)
    }

    pub fn settled<S: Surface>(
        &mut self,
        ctx: &mut Ctx<S>,
        notifications: &mut NotificationPresenter,
        ok: bool,
    ) -> Result<(), SiteError> {
        if !std::mem::take(&mut self.pending) {
            log::debug!("clipboard result without a pending write");
        }
        let uid = ctx.config.uid.clone();
        if ok {
            notifications.notify(ctx, &copied_message(&uid))?;
            return Ok(());
        }
        log::warn!("clipboard write rejected, falling back to selection copy");
        self.fallback(ctx, notifications, &uid)
    }

    fn fallback<S: Surface>(
        &mut self,
        ctx: &mut Ctx<S>,
        notifications: &mut NotificationPresenter,
        uid: &str,
    ) -> Result<(), SiteError> {
        match ctx.surface.copy_via_selection(uid) {
            Ok(()) => {
                notifications.notify(ctx, &copied_message(uid))?;
            }
            Err(error) => {
                log::warn!("{error}");
                ctx.surface.alert(&manual_copy_message(uid))?;
            }
        }
        Ok(())
    }
}

pub fn copied_message(uid: &str) -> String {
    format!("UID {uid} copied to clipboard!")
}

pub fn manual_copy_message(uid: &str) -> String {
    format!("Please copy this UID manually: {uid}")
}
