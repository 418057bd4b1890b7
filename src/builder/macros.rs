//! Macros for ergonomic scene table construction.

/// Generate a scene identifier enum with its `SceneId` implementation.
///
/// # Example
///
/// ```
/// use stagehand::scene_ids;
///
/// scene_ids! {
///     pub enum GameMode {
///         Menu,
///         Playing,
///         Paused,
///         GameOver,
///     }
/// }
/// ```
#[macro_export]
macro_rules! scene_ids {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::SceneId for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
