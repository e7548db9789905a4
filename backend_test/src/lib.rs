use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, FnArg, Ident, ItemFn, Pat, Signature, Type};

/// Transform an asynchronous test into a synchronous one against a fresh,
/// demo-seeded server, optionally connecting a wallet first.
///
/// Injectable dependencies are [`rocket::local::asynchronous::Client`] and
/// [`crate::model::store::SharedStore`]. Pass `admin` or `student` to connect
/// the client with the configured admin wallet or a registered demo voter.
#[proc_macro_attribute]
pub fn backend_test(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut item_fn = parse_macro_input!(input as ItemFn);

    // Extract injected parameters and reject invalid function signatures.
    let (test_args, store_idents) = match check_sig(item_fn.sig.clone()) {
        Ok(args) => args,
        Err(err) => {
            return err.into_compile_error().into();
        }
    };

    // Rename the future so the test can have its original name.
    let name = item_fn.sig.ident.clone();
    let new_name = format_ident!("{}_fut", name);
    item_fn.sig.ident = new_name.clone();

    // Connect the client as admin/student if needed.
    let maybe_connect = match parse_macro_input!(args as Option<Ident>) {
        None => TokenStream2::new(),
        Some(arg) => {
            let request = if arg == "admin" {
                quote! { crate::model::api::auth::WalletRequest::admin() }
            } else if arg == "student" {
                quote! { crate::model::api::auth::WalletRequest::student() }
            } else {
                return syn::Error::new(arg.span(), "Expected `admin` or `student`")
                    .into_compile_error()
                    .into();
            };
            quote! {
                let status = rocket_client
                    .post(uri!(crate::api::auth::connect))
                    .header(rocket::http::ContentType::JSON)
                    .body(rocket::serde::json::json!(#request).to_string())
                    .dispatch()
                    .await
                    .status();
                assert_eq!(rocket::http::Status::Ok, status);
            }
        }
    };

    // Rewrite the test function.
    quote! {
        #[test]
        fn #name() {
            /// Test setup.
            async fn setup() -> rocket::local::asynchronous::Client {
                let rocket_client =
                    rocket::local::asynchronous::Client::tracked(crate::test_rocket())
                        .await
                        .unwrap();

                #maybe_connect

                rocket_client
            }

            /// The test itself.
            #item_fn

            // Create an async runtime for setup and one for the test. The
            // status watcher is spawned during setup and lives until the
            // setup runtime is dropped.
            let outer_runtime = rocket::tokio::runtime::Builder::new_multi_thread()
                .thread_name("test-setup")
                .worker_threads(1)
                .enable_all()
                .build()
                .unwrap();
            let inner_runtime = rocket::tokio::runtime::Builder::new_multi_thread()
                .thread_name("rocket-worker-test-thread")
                .worker_threads(1)
                .enable_all()
                .build()
                .unwrap();

            // Run the setup.
            let rocket_client = outer_runtime.block_on(setup());

            // Run the test, catching any panics.
            // Use mutexes to safely transfer `!UnwindSafe` data.
            let client_mutex = std::sync::Mutex::new(rocket_client);
            let runtime_mutex = std::sync::Mutex::new(inner_runtime);
            let result = std::panic::catch_unwind(|| {
                let rocket_client = client_mutex.into_inner().unwrap();
                let runtime = runtime_mutex.into_inner().unwrap();

                #(
                    let #store_idents = rocket_client
                        .rocket()
                        .state::<crate::model::store::SharedStore>()
                        .unwrap()
                        .clone();
                )*

                runtime.block_on(#new_name(#(#test_args),*));
            });

            // Stop background tasks before reporting.
            drop(outer_runtime);

            // If the test panicked, re-raise the panic.
            if let Err(cause) = result {
                std::panic::panic_any(cause);
            }
        }
    }
    .into()
}

/// Ensure the wrapped test is async, extract parameters to inject, and reject unknown parameters.
fn check_sig(sig: Signature) -> Result<(Vec<TokenStream2>, Vec<Ident>), syn::Error> {
    if sig.asyncness.is_none() {
        return Err(syn::Error::new(sig.span(), "Test must be marked `async`"));
    }

    let mut has_client = false;
    let mut args = vec![];
    let mut store_idents = vec![];

    for input in &sig.inputs {
        if let FnArg::Typed(pat_type) = input {
            if let Pat::Ident(pat_ident) = &*pat_type.pat {
                if let Type::Path(type_path) = &*pat_type.ty {
                    if let Some(type_ident) = type_path.path.get_ident() {
                        if type_ident == "Client" {
                            if has_client {
                                return Err(syn::Error::new(
                                    input.span(),
                                    "Test cannot accept more than one `Client`",
                                ));
                            }
                            has_client = true;
                            args.push(quote! { rocket_client });
                            continue;
                        } else if type_ident == "SharedStore" {
                            let ident = pat_ident.ident.clone();
                            args.push(quote! { #ident });
                            store_idents.push(ident);
                            continue;
                        }
                    }
                }
            }
        }

        return Err(syn::Error::new(
            input.span(),
            "Expected one of `client_ident: Client` or `store_ident: SharedStore`",
        ));
    }

    Ok((args, store_idents))
}
