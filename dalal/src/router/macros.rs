/// Generate a router async method that calls a single-symbol collaborator
/// capability on the first registered connector that answers successfully.
///
/// Notes on the `what` label:
/// - Pass a noun only (e.g., "info", "latest close").
/// - The orchestrator formats the final error as "{what} for {SYMBOL}".
#[macro_export]
macro_rules! dalal_router_method {
    (
        $(#[$meta:meta])*
        method: $name:ident( $sym:ident : &Symbol $(, $arg_ident:ident : $arg_ty:ty )* ) -> $ret:ty,
        accessor: $accessor:ident,
        capability: $capability:expr,
        what: $what:expr,
        call: $call_name:ident( $call_first:ident $(, $call_rest:ident )* )
    ) => {
        $(#[$meta])*
        #[cfg_attr(
            feature = "tracing",
            tracing::instrument(
                target = "dalal::router",
                skip(self $(, $arg_ident)*),
                fields(symbol = %$sym),
            )
        )]
        ///
        /// # Errors
        /// Returns an error if no registered connector offers the capability or none succeeds.
        pub async fn $name(
            &self,
            $sym: &dalal_core::Symbol,
            $( $arg_ident: $arg_ty ),*
        ) -> Result<$ret, dalal_core::DalalError> {
            self.fetch_single(
                $capability,
                format!("{} for {}", $what, $sym),
                move |c| {
                    c.$accessor()?;
                    let s = $sym.clone();
                    Some(async move {
                        match c.$accessor() {
                            Some(p) => p.$call_name(&s $(, $call_rest )*).await,
                            None => Err(dalal_core::DalalError::unsupported($capability.as_str())),
                        }
                    })
                },
            )
            .await
        }
    };
}
