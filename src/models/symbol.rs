/// Identifier for a tracked instrument (a TIDM code such as "VOD").
///
/// Opaque to this layer. Duplicates within a portfolio are allowed and are
/// treated as independent list entries.
pub type Symbol = String;
