use crate::domain::listing::{Listing, Photo};
use crate::templates::admin_layout;
use crate::templates::components::form_errors;
use maud::{html, Markup};

pub struct PhotosVm<'a> {
    pub listing: &'a Listing,
    pub photos: &'a [Photo],
    pub errors: Vec<String>,
    pub uploads_enabled: bool,
    pub max_upload_bytes: u64,
}

pub fn photos_page(site_name: &str, vm: &PhotosVm<'_>) -> Markup {
    let l = vm.listing;
    admin_layout(
        site_name,
        "Fotos",
        html! {
            h1 { "Fotos · " (l.title) }
            p { a href=(format!("/admin/imoveis/{}/editar", l.id)) { "← Voltar ao imóvel" } }

            (form_errors(&vm.errors))

            @if vm.uploads_enabled {
                form method="post" action=(format!("/admin/imoveis/{}/fotos", l.id))
                    enctype="multipart/form-data" class="card"
                {
                    label for="photo" { "Nova foto (JPEG, PNG ou WebP, até " (vm.max_upload_bytes / (1024 * 1024)) " MB)" }
                    input type="file" id="photo" name="photo" accept="image/jpeg,image/png,image/webp" required;
                    button type="submit" class="primary" { "Enviar" }
                }
            } @else {
                p class="muted" { "Envio de fotos não configurado." }
            }

            @if vm.photos.is_empty() {
                p class="muted" { "Nenhuma foto ainda." }
            } @else {
                div class="photo-grid" {
                    @for (i, photo) in vm.photos.iter().enumerate() {
                        figure {
                            img src=(photo.url) alt="";
                            figcaption {
                                @if i == 0 {
                                    span class="pill on" { "Capa" }
                                } @else {
                                    form method="post" action=(format!("/admin/fotos/{}/capa", photo.id)) class="inline" {
                                        button type="submit" class="pill" { "Usar como capa" }
                                    }
                                }
                                form method="post" action=(format!("/admin/fotos/{}/excluir", photo.id)) class="inline"
                                    onsubmit="return confirm('Excluir esta foto?');"
                                {
                                    button type="submit" class="danger small" { "Excluir" }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
