use contracts::dashboards::d402_insight_explorer::ProductByContext;
use contracts::shared::filters::AnalyticsQuery;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::dashboards::d402_insight_explorer::api;
use crate::shared::api_utils::RequestSeq;
use crate::shared::config::use_tenant;
use crate::shared::format::{format_currency, format_number};

const PRODUCTS_LIMIT: u32 = 20;

/// Top products for the current filters. Refetches whenever `query` changes.
#[component]
pub fn ProductsByContextTable(#[prop(into)] query: Signal<AnalyticsQuery>) -> impl IntoView {
    let tenant = use_tenant();
    let (products, set_products) = signal(Vec::<ProductByContext>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let requests = StoredValue::new(RequestSeq::default());

    Effect::new(move |_| {
        let query = query.get();
        let tenant = tenant.clone();
        let request = requests.try_update_value(RequestSeq::next).unwrap_or_default();
        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            let result = api::get_products_by_context(&tenant, &query, PRODUCTS_LIMIT).await;
            // a newer query was issued meanwhile
            if !requests.try_with_value(|r| r.is_latest(request)).unwrap_or(false) {
                return;
            }
            match result {
                Ok(response) => set_products.set(response.products),
                Err(e) => {
                    log::error!("Failed to load products by context: {}", e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    });

    view! {
        <Card>
            <h3>"Produtos mais vendidos no contexto"</h3>
            {move || {
                if loading.get() {
                    return view! { <Spinner size=SpinnerSize::Small /> }.into_any();
                }
                if let Some(err) = error.get() {
                    return view! { <div class="d402-error">"⚠ " {err}</div> }.into_any();
                }
                let rows = products.get();
                if rows.is_empty() {
                    return view! {
                        <div class="d402-empty">"Nenhum produto vendido com esses filtros."</div>
                    }.into_any();
                }

                view! {
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"#"</TableHeaderCell>
                                <TableHeaderCell>"Produto"</TableHeaderCell>
                                <TableHeaderCell>"Categoria"</TableHeaderCell>
                                <TableHeaderCell>"Vendas"</TableHeaderCell>
                                <TableHeaderCell>"Receita"</TableHeaderCell>
                                <TableHeaderCell>"Preço médio"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {rows.into_iter().enumerate().map(|(i, product)| view! {
                                <TableRow>
                                    <TableCell><TableCellLayout>{i + 1}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{product.product_name}</TableCellLayout></TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            {product.category.unwrap_or_else(|| "—".to_string())}
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{format_number(product.times_sold as f64)}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{format_currency(product.total_revenue)}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{format_currency(product.avg_price)}</TableCellLayout>
                                    </TableCell>
                                </TableRow>
                            }).collect_view()}
                        </TableBody>
                    </Table>
                }.into_any()
            }}
        </Card>
    }
}
