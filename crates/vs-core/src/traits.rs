use crate::frame::GrayFrame;

/// Fournit des frames décodées au scheduler de lecture.
///
/// Implémenté par : `VideoSource` (ffmpeg subprocess), doubles de test
/// avec des séquences synthétiques en mémoire.
///
/// La fermeture du handle sous-jacent passe par `Drop` — garantie sur
/// tous les chemins de sortie, erreur comprise.
///
/// # Example
/// ```
/// use vs_core::traits::FrameSource;
/// use vs_core::frame::GrayFrame;
///
/// struct DummySource;
/// impl FrameSource for DummySource {
///     fn next_frame(&mut self) -> Option<GrayFrame> { None }
///     fn frame_rate(&self) -> f64 { 24.0 }
/// }
/// ```
pub trait FrameSource {
    /// Retourne la prochaine frame décodée.
    ///
    /// Retourne `None` si la source est épuisée (fin de flux). Une erreur
    /// de lecture en cours de flux est traitée comme une fin de flux par
    /// l'implémentation, avec un warning distinct dans les logs.
    fn next_frame(&mut self) -> Option<GrayFrame>;

    /// Cadence rapportée par le conteneur, en images par seconde.
    ///
    /// `<= 0` si inconnue — le scheduler substitue alors sa valeur par
    /// défaut.
    fn frame_rate(&self) -> f64;
}

/// Reçoit les text frames et l'instruction de repositionnement curseur.
///
/// Le couple reset-puis-write doit être émis dos à dos (queue puis flush
/// unique) pour qu'aucune frame partielle ne soit jamais visible.
pub trait DisplaySink {
    /// Replace le curseur en haut à gauche, sans flush.
    ///
    /// # Errors
    /// Erreur I/O du terminal sous-jacent.
    fn reset_cursor(&mut self) -> std::io::Result<()>;

    /// Écrit un bloc de texte tel quel, newlines comprises, puis flush.
    ///
    /// # Errors
    /// Erreur I/O du terminal sous-jacent.
    fn write(&mut self, text: &str) -> std::io::Result<()>;
}
