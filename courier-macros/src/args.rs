use syn::{
    Attribute, Ident, LitStr, Token, Type,
    parse::{Parse, ParseStream},
};

/// Arguments of the `#[request(...)]`, `#[query(...)]` and `#[event(...)]`
/// helper attributes.
#[derive(Default)]
pub(crate) struct MessageArgs {
    pub(crate) response: Option<Type>,
    pub(crate) strategy: Option<LitStr>,
}

impl MessageArgs {
    /// Parse every `#[name(...)]` attribute in `attrs`, later ones overriding
    /// earlier ones.
    pub(crate) fn from_attrs(attrs: &[Attribute], name: &str) -> syn::Result<Self> {
        let mut args = MessageArgs::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident(name)) {
            let parsed: MessageArgs = attr.parse_args()?;
            args.response = parsed.response.or(args.response);
            args.strategy = parsed.strategy.or(args.strategy);
        }
        Ok(args)
    }
}

impl Parse for MessageArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut response = None;
        let mut strategy = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "response" => {
                    let ty: Type = input.parse()?;
                    response = Some(ty);
                }
                "strategy" => {
                    let lit: LitStr = input.parse()?;
                    if lit.value().trim().is_empty() {
                        return Err(syn::Error::new(lit.span(), "strategy name must not be empty"));
                    }
                    strategy = Some(lit);
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(MessageArgs { response, strategy })
    }
}
