use std::io;
use std::process::{Command, Stdio};

use reqwest::Url;

use crate::oracle::{Profession, Verdict};

const INTENT_URL: &str = "https://twitter.com/intent/tweet";

pub fn share_text(profession: &Profession, verdict: Verdict) -> String {
    format!(
        "I asked if AI will take my {profession} job. The oracle said... {verdict}!\n\n\
         (Proof attached! 😉) What about yours?\n\n\
         @bengubadev #WillAITakeMyJob"
    )
}

/// Web intent URL with `text` query-encoded.
pub fn share_url(text: &str) -> String {
    match Url::parse_with_params(INTENT_URL, &[("text", text)]) {
        Ok(url) => url.into(),
        // INTENT_URL is a valid absolute URL; parsing cannot fail.
        Err(_) => INTENT_URL.to_string(),
    }
}

/// Opens a URL outside the process, usually in the default browser.
pub trait UrlOpener {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Hands the URL to the platform's opener and does not wait for it.
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> io::Result<()> {
        let mut cmd = if cfg!(target_os = "macos") {
            Command::new("open")
        } else if cfg!(target_os = "windows") {
            Command::new("explorer")
        } else {
            Command::new("xdg-open")
        };
        cmd.arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
    }
}
