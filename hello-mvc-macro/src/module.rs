use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse::Parse, parse::ParseStream, parse_macro_input, Attribute, ItemStruct, Path, Token};

struct ModuleItem {
    attrs: Vec<Attribute>,
    path: Path,
}

impl Parse for ModuleItem {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let path = input.parse()?;
        Ok(ModuleItem { attrs, path })
    }
}

struct ModuleArgs {
    imports: Vec<ModuleItem>,
    controllers: Vec<ModuleItem>,
    providers: Vec<ModuleItem>,
}

impl Parse for ModuleArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut imports = Vec::new();
        let mut controllers = Vec::new();
        let mut providers = Vec::new();

        while !input.is_empty() {
            let name: syn::Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            // [Item1, Item2, ...]
            let content;
            syn::bracketed!(content in input);
            let items: Vec<ModuleItem> = content
                .parse_terminated(ModuleItem::parse, Token![,])?
                .into_iter()
                .collect();

            if name == "imports" {
                imports = items;
            } else if name == "controllers" {
                controllers = items;
            } else if name == "providers" {
                providers = items;
            } else {
                return Err(syn::Error::new_spanned(
                    name,
                    "expected `imports`, `providers` or `controllers`",
                ));
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(ModuleArgs {
            imports,
            controllers,
            providers,
        })
    }
}

pub fn module_attribute(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as ModuleArgs);
    let input = parse_macro_input!(item as ItemStruct);
    let expanded = generate_module_impl(&args, &input);

    TokenStream::from(expanded)
}

fn generate_module_impl(args: &ModuleArgs, input: &ItemStruct) -> TokenStream2 {
    let module_name = &input.ident;

    let import_registrations = args.imports.iter().map(|item| {
        let path = &item.path;
        let attrs = &item.attrs;
        quote! {
            #(#attrs)*
            <#path as ::hello_mvc::Module>::register(container)?;
        }
    });

    // Providers first so controllers can depend on them
    let instance_registrations = args
        .providers
        .iter()
        .chain(args.controllers.iter())
        .map(|item| {
            let path = &item.path;
            let attrs = &item.attrs;
            quote! {
                #(#attrs)*
                {
                    let instance = <#path as ::hello_mvc::Injectable>::inject(container)?;
                    container.register(instance);
                }
            }
        });

    let import_routes = args.imports.iter().map(|item| {
        let path = &item.path;
        let attrs = &item.attrs;
        quote! {
            #(#attrs)*
            let router = <#path as ::hello_mvc::Module>::routes(container, router)?;
        }
    });

    let controller_routes = args.controllers.iter().map(|item| {
        let path = &item.path;
        let attrs = &item.attrs;
        quote! {
            #(#attrs)*
            let router = ::hello_mvc::controller::mount(
                router,
                <#path>::base_path(),
                <#path>::router(container.resolve::<#path>()?),
            );
        }
    });

    let import_mappings = args.imports.iter().map(|item| {
        let path = &item.path;
        let attrs = &item.attrs;
        quote! {
            #(#attrs)*
            <#path as ::hello_mvc::Module>::request_mappings(registry);
        }
    });

    let controller_mappings = args.controllers.iter().map(|item| {
        let path = &item.path;
        let attrs = &item.attrs;
        quote! {
            #(#attrs)*
            registry.register(<#path>::request_mappings());
        }
    });

    quote! {
        #input

        impl ::hello_mvc::Module for #module_name {
            fn register(container: &mut ::hello_mvc::Container) -> ::hello_mvc::Result<()> {
                #(#import_registrations)*
                #(#instance_registrations)*
                Ok(())
            }

            #[allow(unused_variables)]
            fn routes<S>(
                container: &::hello_mvc::Container,
                router: ::axum::Router<S>,
            ) -> ::hello_mvc::Result<::axum::Router<S>>
            where
                S: Clone + Send + Sync + ::hello_mvc::di::HasContainer + 'static,
            {
                #(#import_routes)*
                #(#controller_routes)*
                Ok(router)
            }

            #[allow(unused_variables)]
            fn request_mappings(registry: &mut ::hello_mvc::controller::RequestMappings) {
                #(#import_mappings)*
                #(#controller_mappings)*
            }
        }
    }
}
