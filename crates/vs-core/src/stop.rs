use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Signal d'arrêt coopératif.
///
/// Le handle vit côté émetteur (handler Ctrl-C) ; le token côté boucle de
/// lecture. Le flag atomique répond à `is_raised()` sans consommer de
/// message ; le canal rend l'attente de pacing annulable — une
/// interruption pendant le sleep est immédiate, pas pollée.
///
/// # Example
/// ```
/// use vs_core::stop::stop_pair;
/// use std::time::Duration;
///
/// let (handle, token) = stop_pair();
/// assert!(!token.is_raised());
/// handle.raise();
/// assert!(token.is_raised());
/// assert!(token.sleep(Duration::from_secs(1)));
/// ```
#[must_use]
pub fn stop_pair() -> (StopHandle, StopToken) {
    let raised = Arc::new(AtomicBool::new(false));
    let (tx, rx) = flume::bounded(1);
    (
        StopHandle {
            raised: Arc::clone(&raised),
            tx,
        },
        StopToken { raised, rx },
    )
}

/// Émetteur du signal d'arrêt. Clonable, `Send` — utilisable depuis un
/// handler de signal.
#[derive(Clone)]
pub struct StopHandle {
    raised: Arc<AtomicBool>,
    tx: flume::Sender<()>,
}

impl StopHandle {
    /// Lève le signal. Idempotent, jamais bloquant.
    pub fn raise(&self) {
        self.raised.store(true, Ordering::Relaxed);
        let _ = self.tx.try_send(());
    }
}

/// Récepteur du signal d'arrêt, détenu par le scheduler.
pub struct StopToken {
    raised: Arc<AtomicBool>,
    rx: flume::Receiver<()>,
}

impl StopToken {
    /// `true` si le signal a été levé.
    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Relaxed)
    }

    /// Suspend le thread courant pendant `dur` au plus.
    ///
    /// Retourne `true` si le signal a été levé (l'attente est alors
    /// écourtée), `false` si la durée complète s'est écoulée. Handle
    /// déconnecté : plus aucune interruption possible, sleep ordinaire.
    #[must_use]
    pub fn sleep(&self, dur: Duration) -> bool {
        if self.is_raised() {
            return true;
        }
        match self.rx.recv_timeout(dur) {
            Ok(()) => true,
            Err(flume::RecvTimeoutError::Timeout) => self.is_raised(),
            Err(flume::RecvTimeoutError::Disconnected) => {
                std::thread::sleep(dur);
                false
            }
        }
    }
}
