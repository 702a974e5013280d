//! Derive macros for the Courier message traits.
//!
//! Every derive also implements `Message`, so a type derives exactly one of
//! them. Generated code refers to the `courier` facade crate.

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

mod args;

use args::MessageArgs;

/// Derive macro for implementing `Message` trait.
#[proc_macro_derive(Message)]
pub fn derive_message(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    TokenStream::from(message_impl(&input))
}

/// Derive macro for implementing `Request`.
///
/// ```rust,ignore
/// #[derive(Request)]
/// #[request(response = u64)]
/// struct CreateUser { name: String }
/// ```
#[proc_macro_derive(Request, attributes(request))]
pub fn derive_request(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match request_impl(&input, "request") {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Derive macro for implementing `Request` and `Query`.
///
/// ```rust,ignore
/// #[derive(Query)]
/// #[query(response = String)]
/// struct GetUserName { id: u64 }
/// ```
#[proc_macro_derive(Query, attributes(query))]
pub fn derive_query(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let request = match request_impl(&input, "query") {
        Ok(expanded) => expanded,
        Err(err) => return err.to_compile_error().into(),
    };

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        #request
        impl #impl_generics ::courier::Query for #name #ty_generics #where_clause {}
    };

    TokenStream::from(expanded)
}

/// Derive macro for a request without a response.
#[proc_macro_derive(Command)]
pub fn derive_command(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let message = message_impl(&input);

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        #message
        impl #impl_generics ::courier::Request for #name #ty_generics #where_clause {
            type Response = ();
        }
    };

    TokenStream::from(expanded)
}

/// Derive macro for implementing `Event`.
///
/// An optional `#[event(strategy = "...")]` names the delivery strategy the
/// event is published with.
///
/// ```rust,ignore
/// #[derive(Event)]
/// #[event(strategy = "concurrent")]
/// struct UserCreated { id: u64 }
/// ```
#[proc_macro_derive(Event, attributes(event))]
pub fn derive_event(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let args = match MessageArgs::from_attrs(&input.attrs, "event") {
        Ok(args) => args,
        Err(err) => return err.to_compile_error().into(),
    };
    if let Some(response) = &args.response {
        return syn::Error::new_spanned(response, "events do not have a response")
            .to_compile_error()
            .into();
    }

    let message = message_impl(&input);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let strategy = args.strategy.map(|lit| {
        quote! {
            fn strategy(&self) -> ::core::option::Option<&str> {
                ::core::option::Option::Some(#lit)
            }
        }
    });

    let expanded = quote! {
        #message
        impl #impl_generics ::courier::Event for #name #ty_generics #where_clause {
            #strategy
        }
    };

    TokenStream::from(expanded)
}

fn message_impl(input: &DeriveInput) -> proc_macro2::TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        impl #impl_generics ::courier::Message for #name #ty_generics #where_clause {}
    }
}

fn request_impl(input: &DeriveInput, attr: &str) -> syn::Result<proc_macro2::TokenStream> {
    let args = MessageArgs::from_attrs(&input.attrs, attr)?;
    if let Some(strategy) = &args.strategy {
        return Err(syn::Error::new(
            strategy.span(),
            "only events can name a delivery strategy",
        ));
    }
    let response = args.response.ok_or_else(|| {
        syn::Error::new_spanned(
            &input.ident,
            format!("missing `#[{attr}(response = Type)]` attribute"),
        )
    })?;

    let message = message_impl(input);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #message
        impl #impl_generics ::courier::Request for #name #ty_generics #where_clause {
            type Response = #response;
        }
    })
}
