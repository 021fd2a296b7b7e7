use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    parse::Parse, parse::ParseStream, parse_macro_input, Attribute, FnArg, ImplItem, ImplItemFn,
    ItemImpl, ItemStruct, LitStr, ReturnType, Token, Type,
};

const HTTP_METHODS: [&str; 5] = ["get", "post", "put", "delete", "patch"];

struct ControllerArgs {
    path: String,
}

impl Parse for ControllerArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut path = None;
        while !input.is_empty() {
            let name: syn::Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            if name == "path" {
                let lit: LitStr = input.parse()?;
                path = Some(lit.value());
            } else {
                let _: syn::Expr = input.parse()?;
            }
            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }
        Ok(ControllerArgs { path: path.unwrap_or_else(|| "/".to_string()) })
    }
}

pub fn controller_attribute(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as ControllerArgs);
    let input = parse_macro_input!(item as ItemStruct);
    let expanded = generate_controller_impl(&args, &input);
    TokenStream::from(expanded)
}

fn generate_controller_impl(args: &ControllerArgs, input: &ItemStruct) -> TokenStream2 {
    let struct_name = &input.ident;
    let base_path = &args.path;
    let injectable_impl = match generate_injectable_for_controller(input) {
        Ok(tokens) => tokens,
        Err(err) => return err.to_compile_error(),
    };
    quote! {
        #input
        #injectable_impl
        impl #struct_name {
            pub fn base_path() -> &'static str { #base_path }
        }
    }
}

fn generate_injectable_for_controller(input: &ItemStruct) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let fields = match &input.fields {
        syn::Fields::Named(fields) => &fields.named,
        other => {
            return Err(syn::Error::new_spanned(
                other,
                "#[controller] only supports structs with named fields",
            ))
        }
    };
    let field_injections = fields.iter().map(|field| {
        let field_name = &field.ident;
        let field_type = extract_injectable_type(&field.ty);
        quote! { #field_name: container.resolve::<#field_type>()? }
    });
    Ok(quote! {
        impl ::hello_mvc::Injectable for #struct_name {
            #[allow(unused_variables)]
            fn inject(container: &::hello_mvc::Container) -> ::hello_mvc::Result<Self> {
                Ok(Self { #(#field_injections),* })
            }
        }
    })
}

fn extract_injectable_type(ty: &Type) -> Type {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            if segment.ident == "Arc" {
                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    if let Some(syn::GenericArgument::Type(inner_type)) = args.args.first() {
                        return inner_type.clone();
                    }
                }
            }
        }
    }
    ty.clone()
}

#[derive(Clone, PartialEq)]
enum ParamKind {
    Body,
    Param,
    Query,
    Writer,
    Raw,
}

struct ParamInfo {
    ty: Type,
    kind: ParamKind,
}

struct RouteInfo {
    method: String,
    path: String,
    fn_name: syn::Ident,
    params: Vec<ParamInfo>,
    response_body: bool,
    response_status: Option<syn::Path>,
    text_body: bool,
}

pub fn routes_attribute(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemImpl);
    let expanded = generate_routes_impl(input).unwrap_or_else(|err| err.to_compile_error());
    TokenStream::from(expanded)
}

fn generate_routes_impl(input: ItemImpl) -> syn::Result<TokenStream2> {
    let mut routes: Vec<RouteInfo> = Vec::new();
    let mut clean_items: Vec<ImplItem> = Vec::new();

    for item in input.items.iter() {
        match item {
            ImplItem::Fn(method) => match extract_route_info(method)? {
                Some(route_info) => {
                    routes.push(route_info);
                    let mut clean_method = method.clone();
                    clean_method.attrs.retain(|attr| !is_route_attr(attr));
                    for input in clean_method.sig.inputs.iter_mut() {
                        if let FnArg::Typed(pat_type) = input {
                            pat_type.attrs.retain(|attr| !is_param_attr(attr));
                        }
                    }
                    clean_items.push(ImplItem::Fn(clean_method));
                }
                None => clean_items.push(item.clone()),
            },
            _ => clean_items.push(item.clone()),
        }
    }

    let route_registrations = routes.iter().map(generate_route_registration);

    let mappings = routes.iter().map(|route| {
        let method = &route.method;
        let path = &route.path;
        let handler = route.fn_name.to_string();
        quote! {
            ::hello_mvc::controller::RequestMapping::new(#method, Self::base_path(), #path, #handler)
        }
    });

    let self_ty = &input.self_ty;
    let impl_generics = &input.generics;

    Ok(quote! {
        impl #impl_generics #self_ty {
            #(#clean_items)*

            pub fn router<S>(controller: ::std::sync::Arc<Self>) -> ::axum::Router<S>
            where
                S: Clone + Send + Sync + ::hello_mvc::di::HasContainer + 'static,
            {
                ::axum::Router::new() #(#route_registrations)*
            }

            pub fn request_mappings() -> ::std::vec::Vec<::hello_mvc::controller::RequestMapping> {
                ::std::vec![#(#mappings),*]
            }
        }
    })
}

fn generate_route_registration(route: &RouteInfo) -> TokenStream2 {
    let method_ident = match route.method.as_str() {
        "POST" => quote! { ::axum::routing::post },
        "PUT" => quote! { ::axum::routing::put },
        "DELETE" => quote! { ::axum::routing::delete },
        "PATCH" => quote! { ::axum::routing::patch },
        _ => quote! { ::axum::routing::get },
    };

    let path = &route.path;
    let fn_name = &route.fn_name;

    let extractor_patterns: Vec<_> = route
        .params
        .iter()
        .enumerate()
        .filter(|(_, p)| p.kind != ParamKind::Writer)
        .map(|(i, p)| {
            let temp_ident = format_ident!("__p_{}", i);
            let ty = &p.ty;
            match p.kind {
                ParamKind::Body => quote! { ::axum::Json(#temp_ident): ::axum::Json<#ty> },
                ParamKind::Param => {
                    quote! { ::axum::extract::Path(#temp_ident): ::axum::extract::Path<#ty> }
                }
                ParamKind::Query => {
                    quote! { ::axum::extract::Query(#temp_ident): ::axum::extract::Query<#ty> }
                }
                _ => quote! { #temp_ident: #ty },
            }
        })
        .collect();

    let call_args: Vec<_> = route
        .params
        .iter()
        .enumerate()
        .map(|(i, p)| match p.kind {
            ParamKind::Writer => quote! { &mut __writer },
            _ => {
                let temp_ident = format_ident!("__p_{}", i);
                quote! { #temp_ident }
            }
        })
        .collect();

    let invoke = if route.params.iter().any(|p| p.kind == ParamKind::Writer) {
        quote! {
            let mut __writer = ::hello_mvc::common::ResponseWriter::new();
            let __outcome = controller.#fn_name(#(#call_args),*).await;
            let __response = __writer.complete(__outcome);
        }
    } else {
        let render = if route.response_body && !route.text_body {
            quote! { ::axum::response::IntoResponse::into_response(::axum::Json(__value)) }
        } else {
            quote! { ::axum::response::IntoResponse::into_response(__value) }
        };
        quote! {
            let __value = controller.#fn_name(#(#call_args),*).await;
            let __response = #render;
        }
    };

    let finish = match &route.response_status {
        Some(status) => {
            let status = status_tokens(status);
            quote! {
                let mut __response = __response;
                if __response.status().is_success() {
                    *__response.status_mut() = #status;
                }
                __response
            }
        }
        None => quote! { __response },
    };

    quote! {
        .route(#path, #method_ident({
            let controller = controller.clone();
            move |#(#extractor_patterns),*| {
                let controller = controller.clone();
                async move {
                    #invoke
                    #finish
                }
            }
        }))
    }
}

fn status_tokens(status: &syn::Path) -> TokenStream2 {
    match status.get_ident() {
        Some(name) => quote! { ::axum::http::StatusCode::#name },
        None => quote! { #status },
    }
}

fn extract_route_info(method: &ImplItemFn) -> syn::Result<Option<RouteInfo>> {
    let mut http_method = None;
    let mut path = String::new();
    let mut response_body = false;
    let mut response_status = None;

    for attr in &method.attrs {
        let Some(ident) = attr.path().get_ident() else {
            continue;
        };
        let name = ident.to_string();
        if HTTP_METHODS.contains(&name.as_str()) {
            http_method = Some(name.to_uppercase());
            path = attr.parse_args::<LitStr>()?.value();
        } else if name == "response_body" {
            response_body = true;
        } else if name == "response_status" {
            response_status = Some(attr.parse_args::<syn::Path>()?);
        }
    }
    let Some(http_method) = http_method else {
        return Ok(None);
    };

    let mut params = Vec::new();
    for input in method.sig.inputs.iter() {
        if let FnArg::Typed(pat_type) = input {
            let ty = (*pat_type.ty).clone();
            let kind = if is_writer_type(&ty) {
                ParamKind::Writer
            } else {
                get_param_kind(&pat_type.attrs)
            };
            params.push(ParamInfo { ty, kind });
        }
    }

    let text_body = match &method.sig.output {
        ReturnType::Type(_, ty) => is_text_type(ty),
        ReturnType::Default => false,
    };

    Ok(Some(RouteInfo {
        method: http_method,
        path,
        fn_name: method.sig.ident.clone(),
        params,
        response_body,
        response_status,
        text_body,
    }))
}

fn last_segment_is(ty: &Type, name: &str) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == name),
        _ => false,
    }
}

/// `&mut ResponseWriter` parameters are supplied by the generated handler.
fn is_writer_type(ty: &Type) -> bool {
    match ty {
        Type::Reference(reference) => {
            reference.mutability.is_some() && last_segment_is(&reference.elem, "ResponseWriter")
        }
        _ => false,
    }
}

fn is_text_type(ty: &Type) -> bool {
    match ty {
        Type::Reference(reference) => last_segment_is(&reference.elem, "str"),
        other => last_segment_is(other, "String"),
    }
}

fn get_param_kind(attrs: &[Attribute]) -> ParamKind {
    for attr in attrs {
        if let Some(ident) = attr.path().get_ident() {
            match ident.to_string().as_str() {
                "body" => return ParamKind::Body,
                "param" => return ParamKind::Param,
                "query" => return ParamKind::Query,
                _ => {}
            }
        }
    }
    ParamKind::Raw
}

fn is_route_attr(attr: &Attribute) -> bool {
    attr.path().get_ident().is_some_and(|ident| {
        let name = ident.to_string();
        HTTP_METHODS.contains(&name.as_str()) || name == "response_body" || name == "response_status"
    })
}

fn is_param_attr(attr: &Attribute) -> bool {
    attr.path()
        .get_ident()
        .is_some_and(|ident| ["body", "param", "query"].contains(&ident.to_string().as_str()))
}
